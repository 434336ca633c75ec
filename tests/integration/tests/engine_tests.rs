//! End-to-end tests over the full service stack
//!
//! Everything runs in process against the wired store and bus; each test
//! builds its own environment so there is no shared state between tests.

use anyhow::Result;

use huddle_core::{DomainError, Identity, MessageQuery, MessageScope, RecordId};
use huddle_service::{
    ChannelService, ConversationService, CreateChannelRequest, CreateMessageRequest,
    MemberService, MessageService, ReactionService, WorkspaceService,
};
use integration_tests::{unique_user, TestEnv};

// ============================================================================
// Workspaces and membership
// ============================================================================

#[tokio::test]
async fn test_workspace_creator_becomes_admin() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;

    let admin = MemberService::new(&env.ctx)
        .current(seeded.admin, seeded.workspace_id)
        .await?
        .expect("admin member row");
    assert!(admin.is_admin());

    let plain = MemberService::new(&env.ctx)
        .current(seeded.member, seeded.workspace_id)
        .await?
        .expect("plain member row");
    assert!(!plain.is_admin());
    Ok(())
}

#[tokio::test]
async fn test_workspace_list_is_membership_filtered() -> Result<()> {
    let env = TestEnv::new()?;
    let first = env.seed_workspace().await?;
    let second = env.seed_workspace().await?;

    let workspaces = WorkspaceService::new(&env.ctx).list(first.admin).await?;
    assert_eq!(workspaces.len(), 1);
    assert_eq!(workspaces[0].id, first.workspace_id);

    // Joining the second workspace makes it visible.
    env.join_workspace(second.workspace_id, first.admin).await?;
    let workspaces = WorkspaceService::new(&env.ctx).list(first.admin).await?;
    assert_eq!(workspaces.len(), 2);

    assert!(WorkspaceService::new(&env.ctx)
        .list(Identity::anonymous())
        .await?
        .is_empty());
    Ok(())
}

#[tokio::test]
async fn test_workspace_get_hidden_from_outsiders() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;

    let service = WorkspaceService::new(&env.ctx);
    assert!(service
        .get(seeded.member, seeded.workspace_id)
        .await?
        .is_some());
    assert!(service
        .get(unique_user(), seeded.workspace_id)
        .await?
        .is_none());
    assert!(service
        .get(Identity::anonymous(), seeded.workspace_id)
        .await?
        .is_none());
    Ok(())
}

#[tokio::test]
async fn test_member_list_visible_to_members_only() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;

    let service = MemberService::new(&env.ctx);
    let members = service.list(seeded.member, seeded.workspace_id).await?;
    assert_eq!(members.len(), 2);

    assert!(service
        .list(unique_user(), seeded.workspace_id)
        .await?
        .is_empty());
    Ok(())
}

// ============================================================================
// Channels
// ============================================================================

#[tokio::test]
async fn test_channel_name_is_normalized() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;

    let channel_id = env
        .seed_channel(seeded.admin, seeded.workspace_id, "  Dev   --  Ops ")
        .await?;
    let channel = ChannelService::new(&env.ctx)
        .get(seeded.admin, channel_id)
        .await?
        .expect("channel");
    assert_eq!(channel.name, "dev-ops");
    Ok(())
}

#[tokio::test]
async fn test_channel_name_must_normalize_to_something() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;
    let service = ChannelService::new(&env.ctx);

    // Non-empty raw strings that are all separators normalize to "".
    for raw in ["---", "  \t ", " - - "] {
        let err = service
            .create(
                seeded.admin,
                CreateChannelRequest {
                    workspace_id: seeded.workspace_id,
                    name: raw.to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)), "raw {raw:?}");
    }

    let channel_id = env
        .seed_channel(seeded.admin, seeded.workspace_id, "general")
        .await?;
    let err = service
        .rename(seeded.admin, channel_id, "--")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    // The failed rename leaves the channel untouched.
    let channel = service
        .get(seeded.admin, channel_id)
        .await?
        .expect("channel");
    assert_eq!(channel.name, "general");
    Ok(())
}

#[tokio::test]
async fn test_channel_mutations_are_admin_gated() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;
    let service = ChannelService::new(&env.ctx);

    let err = service
        .create(
            seeded.member,
            CreateChannelRequest {
                workspace_id: seeded.workspace_id,
                name: "general".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_forbidden());

    let err = service
        .create(
            Identity::anonymous(),
            CreateChannelRequest {
                workspace_id: seeded.workspace_id,
                name: "general".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthenticated));

    let channel_id = env
        .seed_channel(seeded.admin, seeded.workspace_id, "general")
        .await?;
    assert!(service
        .rename(seeded.member, channel_id, "renamed")
        .await
        .unwrap_err()
        .is_forbidden());
    assert!(service
        .delete(seeded.member, channel_id)
        .await
        .unwrap_err()
        .is_forbidden());
    Ok(())
}

#[tokio::test]
async fn test_channel_queries_degrade_for_outsiders() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;
    let channel_id = env
        .seed_channel(seeded.admin, seeded.workspace_id, "general")
        .await?;

    let service = ChannelService::new(&env.ctx);
    let outsider = unique_user();
    assert!(service
        .list(outsider, seeded.workspace_id)
        .await?
        .is_empty());
    assert!(service.get(outsider, channel_id).await?.is_none());
    // Same answer as for a channel that does not exist at all.
    assert!(service
        .get(seeded.member, RecordId::new(999))
        .await?
        .is_none());
    Ok(())
}

#[tokio::test]
async fn test_channel_delete_cascades_messages_and_reactions() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;
    let channel_id = env
        .seed_channel(seeded.admin, seeded.workspace_id, "general")
        .await?;

    let messages = MessageService::new(&env.ctx);
    let parent_id = messages
        .create(
            seeded.member,
            CreateMessageRequest::channel(seeded.workspace_id, channel_id, "root"),
        )
        .await?;
    let reply_id = messages
        .create(
            seeded.member,
            CreateMessageRequest::reply(seeded.workspace_id, parent_id, "reply"),
        )
        .await?;
    ReactionService::new(&env.ctx)
        .toggle(seeded.admin, parent_id, "thumbsup")
        .await?;

    ChannelService::new(&env.ctx)
        .delete(seeded.admin, channel_id)
        .await?;

    assert!(env.ctx.message_repo().find_by_id(parent_id).await?.is_none());
    assert!(env.ctx.message_repo().find_by_id(reply_id).await?.is_none());
    assert!(env
        .ctx
        .reaction_repo()
        .find_by_message(parent_id)
        .await?
        .is_empty());
    assert!(ChannelService::new(&env.ctx)
        .get(seeded.admin, channel_id)
        .await?
        .is_none());
    Ok(())
}

// ============================================================================
// Conversations
// ============================================================================

#[tokio::test]
async fn test_conversation_resolution_is_idempotent_and_symmetric() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;
    let service = ConversationService::new(&env.ctx);

    let first = service
        .resolve_or_create(seeded.admin, seeded.workspace_id, seeded.member_id)
        .await?;
    let again = service
        .resolve_or_create(seeded.admin, seeded.workspace_id, seeded.member_id)
        .await?;
    let reversed = service
        .resolve_or_create(seeded.member, seeded.workspace_id, seeded.admin_member_id)
        .await?;
    assert_eq!(first, again);
    assert_eq!(first, reversed);

    // Notes-to-self is a distinct conversation.
    let with_self = service
        .resolve_or_create(seeded.admin, seeded.workspace_id, seeded.admin_member_id)
        .await?;
    assert_ne!(first, with_self);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_conversation_resolution_has_one_winner() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;

    let mut handles = Vec::new();
    for _ in 0..16 {
        let ctx = env.ctx.clone();
        handles.push(tokio::spawn(async move {
            ConversationService::new(&ctx)
                .resolve_or_create(seeded.admin, seeded.workspace_id, seeded.member_id)
                .await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await??);
    }
    ids.dedup();
    assert_eq!(ids.len(), 1, "all racers must converge on one conversation");
    Ok(())
}

#[tokio::test]
async fn test_conversation_requires_other_member_in_workspace() -> Result<()> {
    let env = TestEnv::new()?;
    let first = env.seed_workspace().await?;
    let second = env.seed_workspace().await?;

    let err = ConversationService::new(&env.ctx)
        .resolve_or_create(first.admin, first.workspace_id, second.member_id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

#[tokio::test]
async fn test_conversation_get_is_participant_gated() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;
    let third = unique_user();
    env.join_workspace(seeded.workspace_id, third).await?;

    let service = ConversationService::new(&env.ctx);
    let conversation_id = service
        .resolve_or_create(seeded.admin, seeded.workspace_id, seeded.member_id)
        .await?;

    assert!(service
        .get(seeded.member, conversation_id)
        .await?
        .is_some());
    // A workspace member outside the pair cannot see it either.
    assert!(service.get(third, conversation_id).await?.is_none());
    Ok(())
}

// ============================================================================
// Messages
// ============================================================================

#[tokio::test]
async fn test_bare_reply_inherits_parent_conversation() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;
    let conversation_id = ConversationService::new(&env.ctx)
        .resolve_or_create(seeded.admin, seeded.workspace_id, seeded.member_id)
        .await?;

    let messages = MessageService::new(&env.ctx);
    let parent_id = messages
        .create(
            seeded.admin,
            CreateMessageRequest::conversation(seeded.workspace_id, conversation_id, "hello"),
        )
        .await?;
    let reply_id = messages
        .create(
            seeded.member,
            CreateMessageRequest::reply(seeded.workspace_id, parent_id, "hi back"),
        )
        .await?;

    let reply = messages
        .get(seeded.member, reply_id)
        .await?
        .expect("reply visible to participant");
    assert_eq!(reply.conversation_id, Some(conversation_id));
    assert!(reply.channel_id.is_none());
    assert_eq!(reply.parent_message_id, Some(parent_id));
    Ok(())
}

#[tokio::test]
async fn test_bare_reply_inherits_parent_channel() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;
    let channel_id = env
        .seed_channel(seeded.admin, seeded.workspace_id, "general")
        .await?;

    let messages = MessageService::new(&env.ctx);
    let parent_id = messages
        .create(
            seeded.member,
            CreateMessageRequest::channel(seeded.workspace_id, channel_id, "root"),
        )
        .await?;
    let reply_id = messages
        .create(
            seeded.admin,
            CreateMessageRequest::reply(seeded.workspace_id, parent_id, "reply"),
        )
        .await?;

    let reply = messages.get(seeded.admin, reply_id).await?.expect("reply");
    assert_eq!(reply.channel_id, Some(channel_id));
    assert!(reply.conversation_id.is_none());
    Ok(())
}

#[tokio::test]
async fn test_reply_to_missing_parent_is_invalid_reference() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;

    let err = MessageService::new(&env.ctx)
        .create(
            seeded.member,
            CreateMessageRequest::reply(seeded.workspace_id, RecordId::new(424_242), "orphan"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidReference(_)));
    Ok(())
}

#[tokio::test]
async fn test_message_create_requires_membership() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;
    let channel_id = env
        .seed_channel(seeded.admin, seeded.workspace_id, "general")
        .await?;

    let err = MessageService::new(&env.ctx)
        .create(
            unique_user(),
            CreateMessageRequest::channel(seeded.workspace_id, channel_id, "hi"),
        )
        .await
        .unwrap_err();
    assert!(err.is_forbidden());
    Ok(())
}

#[tokio::test]
async fn test_message_listing_follows_scope_visibility() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;
    let channel_id = env
        .seed_channel(seeded.admin, seeded.workspace_id, "general")
        .await?;
    let conversation_id = ConversationService::new(&env.ctx)
        .resolve_or_create(seeded.admin, seeded.workspace_id, seeded.admin_member_id)
        .await?;

    let messages = MessageService::new(&env.ctx);
    messages
        .create(
            seeded.member,
            CreateMessageRequest::channel(seeded.workspace_id, channel_id, "public"),
        )
        .await?;
    messages
        .create(
            seeded.admin,
            CreateMessageRequest::conversation(seeded.workspace_id, conversation_id, "private"),
        )
        .await?;

    let query = MessageQuery {
        before: None,
        limit: 10,
    };
    let channel_scope = MessageScope::channel(channel_id);
    let conversation_scope = MessageScope::conversation(conversation_id);

    assert_eq!(messages.list(seeded.member, channel_scope, query).await?.len(), 1);
    assert!(messages
        .list(unique_user(), channel_scope, query)
        .await?
        .is_empty());

    // The notes-to-self conversation is visible only to its participant,
    // not to every workspace member.
    assert_eq!(
        messages
            .list(seeded.admin, conversation_scope, query)
            .await?
            .len(),
        1
    );
    assert!(messages
        .list(seeded.member, conversation_scope, query)
        .await?
        .is_empty());
    Ok(())
}

#[tokio::test]
async fn test_edit_and_delete_are_author_only() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;
    let channel_id = env
        .seed_channel(seeded.admin, seeded.workspace_id, "general")
        .await?;

    let messages = MessageService::new(&env.ctx);
    let message_id = messages
        .create(
            seeded.member,
            CreateMessageRequest::channel(seeded.workspace_id, channel_id, "mine"),
        )
        .await?;

    // Even an admin cannot edit or delete someone else's message.
    assert!(messages
        .update(seeded.admin, message_id, "hijack".to_string())
        .await
        .unwrap_err()
        .is_forbidden());
    assert!(messages
        .delete(seeded.admin, message_id)
        .await
        .unwrap_err()
        .is_forbidden());

    messages
        .update(seeded.member, message_id, "edited".to_string())
        .await?;
    let edited = messages
        .get(seeded.member, message_id)
        .await?
        .expect("message");
    assert_eq!(edited.body, "edited");
    assert!(edited.is_edited());

    messages.delete(seeded.member, message_id).await?;
    assert!(messages.get(seeded.member, message_id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_message_delete_cascades_thread_and_reactions() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;
    let channel_id = env
        .seed_channel(seeded.admin, seeded.workspace_id, "general")
        .await?;

    let messages = MessageService::new(&env.ctx);
    let parent_id = messages
        .create(
            seeded.member,
            CreateMessageRequest::channel(seeded.workspace_id, channel_id, "root"),
        )
        .await?;
    let reply_id = messages
        .create(
            seeded.admin,
            CreateMessageRequest::reply(seeded.workspace_id, parent_id, "reply"),
        )
        .await?;
    ReactionService::new(&env.ctx)
        .toggle(seeded.admin, reply_id, "eyes")
        .await?;

    messages.delete(seeded.member, parent_id).await?;

    assert!(env.ctx.message_repo().find_by_id(reply_id).await?.is_none());
    assert!(env
        .ctx
        .reaction_repo()
        .find_by_message(reply_id)
        .await?
        .is_empty());
    Ok(())
}

// ============================================================================
// Reactions
// ============================================================================

#[tokio::test]
async fn test_reaction_toggle_flips_state() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;
    let channel_id = env
        .seed_channel(seeded.admin, seeded.workspace_id, "general")
        .await?;
    let message_id = MessageService::new(&env.ctx)
        .create(
            seeded.member,
            CreateMessageRequest::channel(seeded.workspace_id, channel_id, "hi"),
        )
        .await?;

    let reactions = ReactionService::new(&env.ctx);
    assert!(reactions.toggle(seeded.admin, message_id, "wave").await?);
    assert!(!reactions.toggle(seeded.admin, message_id, "wave").await?);
    assert!(reactions
        .list_for_message(seeded.admin, message_id)
        .await?
        .is_empty());

    // Same value from two members aggregates, it does not toggle away.
    assert!(reactions.toggle(seeded.admin, message_id, "wave").await?);
    assert!(reactions.toggle(seeded.member, message_id, "wave").await?);
    let groups = reactions.list_for_message(seeded.member, message_id).await?;
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].value, "wave");
    assert_eq!(groups[0].count, 2);
    Ok(())
}

#[tokio::test]
async fn test_reaction_groups_keep_first_seen_order() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;
    let channel_id = env
        .seed_channel(seeded.admin, seeded.workspace_id, "general")
        .await?;
    let message_id = MessageService::new(&env.ctx)
        .create(
            seeded.member,
            CreateMessageRequest::channel(seeded.workspace_id, channel_id, "hi"),
        )
        .await?;

    let reactions = ReactionService::new(&env.ctx);
    reactions.toggle(seeded.admin, message_id, "one").await?;
    reactions.toggle(seeded.member, message_id, "two").await?;
    reactions.toggle(seeded.member, message_id, "one").await?;

    let groups = reactions.list_for_message(seeded.admin, message_id).await?;
    let values: Vec<&str> = groups.iter().map(|g| g.value.as_str()).collect();
    assert_eq!(values, vec!["one", "two"]);
    assert_eq!(groups[0].count, 2);

    // Outsiders see nothing rather than an error.
    assert!(reactions
        .list_for_message(unique_user(), message_id)
        .await?
        .is_empty());
    Ok(())
}

#[tokio::test]
async fn test_reaction_toggle_rejects_outsiders() -> Result<()> {
    let env = TestEnv::new()?;
    let seeded = env.seed_workspace().await?;
    let channel_id = env
        .seed_channel(seeded.admin, seeded.workspace_id, "general")
        .await?;
    let message_id = MessageService::new(&env.ctx)
        .create(
            seeded.member,
            CreateMessageRequest::channel(seeded.workspace_id, channel_id, "hi"),
        )
        .await?;

    let reactions = ReactionService::new(&env.ctx);
    assert!(reactions
        .toggle(unique_user(), message_id, "wave")
        .await
        .unwrap_err()
        .is_forbidden());
    assert!(matches!(
        reactions
            .toggle(Identity::anonymous(), message_id, "wave")
            .await
            .unwrap_err(),
        DomainError::Unauthenticated
    ));
    Ok(())
}
