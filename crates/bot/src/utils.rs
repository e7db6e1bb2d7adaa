//! Helpers shared by command handlers.

use std::error::Error;

use discord::{escape_markdown, CreateMessage, DiscordClient, DiscordError, Embed, Message};
use unistore::{LookupReply, PageAction, StoreView};

pub use unistore::web_name;

const ERROR_COLOR: u32 = 0xe50730;
/// Discord rejects embed descriptions above 4096 characters.
const MAX_TRACE_CHARS: usize = 4000;

/// Where and how a failing command was invoked
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub command: String,
    /// `None` for direct messages
    pub channel_id: Option<String>,
    pub message: String,
    pub author_id: String,
}

#[derive(Debug, Clone)]
pub struct Role {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Member {
    pub id: String,
    pub roles: Vec<Role>,
}

/// Send a DM to a user.
///
/// Returns whether the DM went through. On failure, and when
/// `failure_channel` is given, a notice is posted there instead.
pub async fn send_dm_message(
    client: &DiscordClient,
    user_id: &str,
    text: &str,
    failure_channel: Option<&str>,
) -> bool {
    match deliver_dm(client, user_id, text).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to send DM to {}: {}", user_id, e);
            if let Some(channel_id) = failure_channel {
                let notice = format!("Failed to send DM message to <@{}>", user_id);
                if let Err(e) = client.send_text(channel_id, &notice).await {
                    tracing::error!("Failed to report DM failure: {}", e);
                }
            }
            false
        }
    }
}

async fn deliver_dm(client: &DiscordClient, user_id: &str, text: &str) -> discord::Result<()> {
    let channel = client.create_dm(user_id).await?;
    client.send_text(&channel.id, text).await?;
    Ok(())
}

/// Post the answer of a catalog command, buttons included for a result view.
pub async fn send_lookup_reply(
    client: &DiscordClient,
    channel_id: &str,
    reply: &LookupReply,
) -> discord::Result<Message> {
    client.create_message(channel_id, &reply.message()).await
}

/// Answer a button press on a catalog result view.
///
/// Returns `Ok(false)` without contacting Discord when `custom_id` does not
/// belong to the view.
pub async fn answer_page_action(
    client: &DiscordClient,
    interaction_id: &str,
    interaction_token: &str,
    view: &mut StoreView,
    custom_id: &str,
) -> discord::Result<bool> {
    let Some(action) = PageAction::from_custom_id(custom_id) else {
        return Ok(false);
    };
    let response = view.handle(action);
    client
        .create_interaction_response(interaction_id, interaction_token, &response)
        .await?;
    Ok(true)
}

/// Usage line of a command, e.g. `.unistore <store> [search]`
pub fn command_signature(prefix: &str, qualified_name: &str, signature: &str) -> String {
    format!("{}{} {}", escape_markdown(prefix), qualified_name, signature)
}

/// Case-insensitive membership check of a user argument.
pub fn check_arg(argument: &str, options: &[&str]) -> bool {
    let argument = argument.to_lowercase();
    options.contains(&argument.as_str())
}

fn short_type_name<E>() -> &'static str {
    let full = std::any::type_name::<E>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

fn error_trace(error: &(dyn Error + 'static)) -> String {
    let mut trace = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        trace.push_str("\n\nCaused by: ");
        trace.push_str(&cause.to_string());
        source = cause.source();
    }

    if trace.chars().count() > MAX_TRACE_CHARS {
        trace = trace.chars().take(MAX_TRACE_CHARS).collect();
        trace.push('…');
    }
    trace
}

/// Embed reporting an unexpected command failure.
pub fn create_error_embed<E: Error + 'static>(ctx: &ErrorContext, error: &E) -> Embed {
    let channel = ctx
        .channel_id
        .as_ref()
        .map(|id| format!("<#{}>", id))
        .unwrap_or_else(|| "Direct Message".to_string());

    Embed::new()
        .title(format!("Unexpected exception in command {}", ctx.command))
        .color(ERROR_COLOR)
        .description(format!("```py\n{}```", error_trace(error)))
        .field("Exception Type", short_type_name::<E>(), true)
        .field(
            "Information",
            format!(
                "channel: {}\ncommand: {}\nmessage: {}\nauthor: <@{}>",
                channel, ctx.command, ctx.message, ctx.author_id
            ),
            false,
        )
}

/// Messages to post when a component view fails.
pub fn view_error_messages<E: Error + 'static>(error: &E, ctx: &ErrorContext) -> Vec<CreateMessage> {
    let dyn_error: &(dyn Error + 'static) = error;
    if let Some(discord_error) = dyn_error.downcast_ref::<DiscordError>() {
        if discord_error.is_not_found() {
            return vec![CreateMessage::text("ID not found.")];
        }
        if discord_error.is_forbidden() {
            return vec![CreateMessage::text(format!(
                "💢 I can't help you if you don't let me!\n`{}`.",
                discord_error.text().unwrap_or_default()
            ))];
        }
    }

    vec![
        CreateMessage::text(format!("<@{}> Unexpected exception occurred", ctx.author_id)),
        CreateMessage::embed(create_error_embed(ctx, error)),
    ]
}

fn has_staff_role(member: &Member, staff_roles: &[String]) -> bool {
    member
        .roles
        .iter()
        .any(|role| staff_roles.iter().any(|staff| *staff == role.id || *staff == role.name))
}

/// Staff check: the guild owner, or any member holding a staff role.
pub fn is_staff(member: &Member, guild_owner_id: Option<&str>, staff_roles: &[String]) -> bool {
    if guild_owner_id == Some(member.id.as_str()) {
        return true;
    }
    has_staff_role(member, staff_roles)
}

/// Like [`is_staff`] but without the guild owner bypass.
pub fn is_dsi_staff(member: &Member, staff_roles: &[String]) -> bool {
    has_staff_role(member, staff_roles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(channel_id: Option<&str>) -> ErrorContext {
        ErrorContext {
            command: "unistore".to_string(),
            channel_id: channel_id.map(str::to_string),
            message: ".unistore udb checkpoint".to_string(),
            author_id: "1001".to_string(),
        }
    }

    fn member(id: &str, roles: &[(&str, &str)]) -> Member {
        Member {
            id: id.to_string(),
            roles: roles
                .iter()
                .map(|(id, name)| Role {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_check_arg() {
        assert!(check_arg("UDB", &["udb", "skins"]));
        assert!(!check_arg("gba", &["udb", "skins"]));
    }

    #[test]
    fn test_command_signature() {
        assert_eq!(
            command_signature(".", "unistore", "<store> [search]"),
            ".unistore <store> [search]"
        );
        assert_eq!(command_signature("*", "help", ""), "\\*help ");
    }

    #[test]
    fn test_staff_checks() {
        let staff_roles = vec!["Moderators".to_string(), "555".to_string()];

        let by_name = member("1", &[("100", "Moderators")]);
        let by_id = member("2", &[("555", "Helpers")]);
        let regular = member("3", &[("200", "Members")]);

        assert!(is_staff(&by_name, Some("9"), &staff_roles));
        assert!(is_staff(&by_id, None, &staff_roles));
        assert!(!is_staff(&regular, Some("9"), &staff_roles));

        // The owner bypass only applies to is_staff
        assert!(is_staff(&regular, Some("3"), &staff_roles));
        assert!(!is_dsi_staff(&regular, &staff_roles));
        assert!(is_dsi_staff(&by_id, &staff_roles));
    }

    #[test]
    fn test_create_error_embed() {
        let error = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let embed = create_error_embed(&ctx(Some("77")), &error);

        assert_eq!(
            embed.title.as_deref(),
            Some("Unexpected exception in command unistore")
        );
        assert_eq!(embed.color, Some(ERROR_COLOR));
        assert_eq!(embed.description.as_deref(), Some("```py\ndisk on fire```"));
        assert_eq!(embed.fields[0].name, "Exception Type");
        assert_eq!(embed.fields[0].value, "Error");
        assert!(embed.fields[1].value.starts_with("channel: <#77>\ncommand: unistore"));
        assert!(!embed.fields[1].inline);

        let dm = create_error_embed(&ctx(None), &error);
        assert!(dm.fields[1].value.starts_with("channel: Direct Message"));
    }

    #[test]
    fn test_error_trace_includes_sources_and_is_bounded() {
        let error = crate::error::MonitorError::Persistence(crate::error::PersistenceError::Read {
            path: "/data/ninupdates.xml".into(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "io failure"),
        });
        let trace = error_trace(&error);
        assert!(trace.contains("Caused by: io failure"));

        let long = std::io::Error::new(std::io::ErrorKind::Other, "x".repeat(10_000));
        assert_eq!(error_trace(&long).chars().count(), MAX_TRACE_CHARS + 1);
    }

    #[test]
    fn test_view_error_messages() {
        let not_found = DiscordError::Api {
            status: 404,
            body: "Unknown Message".to_string(),
        };
        let messages = view_error_messages(&not_found, &ctx(Some("1")));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content.as_deref(), Some("ID not found."));

        let forbidden = DiscordError::Api {
            status: 403,
            body: "Missing Permissions".to_string(),
        };
        let messages = view_error_messages(&forbidden, &ctx(Some("1")));
        assert_eq!(
            messages[0].content.as_deref(),
            Some("💢 I can't help you if you don't let me!\n`Missing Permissions`.")
        );

        let other = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let messages = view_error_messages(&other, &ctx(Some("1")));
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[0].content.as_deref(),
            Some("<@1001> Unexpected exception occurred")
        );
        assert_eq!(messages[1].embeds.len(), 1);
    }

    #[tokio::test]
    async fn test_send_dm_message_reports_failure() {
        let client = offline_client();
        assert!(!send_dm_message(&client, "1001", "hello", Some("42")).await);
        assert!(!send_dm_message(&client, "1001", "hello", None).await);
    }

    fn offline_client() -> DiscordClient {
        DiscordClient::with_base_url(reqwest::Client::new(), "token", "http://127.0.0.1:9")
    }

    fn result_view(titles: &[&str]) -> StoreView {
        let apps = titles
            .iter()
            .map(|title| unistore::App {
                title: title.to_string(),
                author: "author".to_string(),
                color: None,
                avatar: None,
                icon: None,
                image: None,
                description: None,
                systems: vec!["3DS".to_string()],
            })
            .collect();
        StoreView::new(unistore::Store::Udb, apps).unwrap()
    }

    #[tokio::test]
    async fn test_send_lookup_reply_reports_http_failure() {
        let reply = LookupReply::View(result_view(&["Checkpoint"]));
        let err = send_lookup_reply(&offline_client(), "42", &reply).await.unwrap_err();
        assert!(matches!(err, DiscordError::Http(_)));
    }

    #[tokio::test]
    async fn test_answer_page_action() {
        let client = offline_client();
        let mut view = result_view(&["A", "B"]);

        // Foreign buttons are left alone
        let handled = answer_page_action(&client, "1", "tok", &mut view, "other:next").await;
        assert!(!handled.unwrap());
        assert_eq!(view.current().title, "A");

        // The view moves even when the callback cannot be delivered
        let err = answer_page_action(&client, "1", "tok", &mut view, "unistore:next")
            .await
            .unwrap_err();
        assert!(matches!(err, DiscordError::Http(_)));
        assert_eq!(view.current().title, "B");
    }
}
