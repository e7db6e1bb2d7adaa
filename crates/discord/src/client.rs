use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::models::{Channel, CreateMessage, Embed, InteractionResponse, Message, User};
use crate::DiscordError;

const BASE_URL: &str = "https://discord.com/api/v10";

/// Discord REST API client authenticated as a bot
pub struct DiscordClient {
    client: Client,
    token: String,
    base_url: String,
}

impl DiscordClient {
    /// Create a new Discord client
    pub fn new(client: Client, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(client: Client, token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(reqwest::header::AUTHORIZATION, format!("Bot {}", self.token))
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> crate::Result<T> {
        let resp = self.authorized(request).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(DiscordError::Api { status, body });
        }

        Ok(resp.json().await?)
    }

    /// The bot's own user. Succeeds once the token is accepted.
    pub async fn current_user(&self) -> crate::Result<User> {
        self.execute(self.client.get(self.url("/users/@me"))).await
    }

    /// Post a message to a channel
    pub async fn create_message(&self, channel_id: &str, message: &CreateMessage) -> crate::Result<Message> {
        tracing::debug!("Sending message to channel {}", channel_id);
        self.execute(
            self.client
                .post(self.url(&format!("/channels/{}/messages", channel_id)))
                .json(message),
        )
        .await
    }

    /// Post a plain text message to a channel
    pub async fn send_text(&self, channel_id: &str, text: &str) -> crate::Result<Message> {
        self.create_message(channel_id, &CreateMessage::text(text)).await
    }

    /// Post a single embed to a channel
    pub async fn send_embed(&self, channel_id: &str, embed: Embed) -> crate::Result<Message> {
        self.create_message(channel_id, &CreateMessage::embed(embed)).await
    }

    /// Open (or fetch) the DM channel with a user
    pub async fn create_dm(&self, recipient_id: &str) -> crate::Result<Channel> {
        self.execute(
            self.client
                .post(self.url("/users/@me/channels"))
                .json(&json!({ "recipient_id": recipient_id })),
        )
        .await
    }

    /// Answer a component interaction
    pub async fn create_interaction_response(
        &self,
        interaction_id: &str,
        interaction_token: &str,
        response: &InteractionResponse,
    ) -> crate::Result<()> {
        let url = self.url(&format!(
            "/interactions/{}/{}/callback",
            interaction_id, interaction_token
        ));

        // Interaction callbacks are authenticated by the token in the path.
        let resp = self.client.post(&url).json(response).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(DiscordError::Api { status, body });
        }

        Ok(())
    }
}
