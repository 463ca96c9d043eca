//! Redemption emails via the SendGrid v3 API.

use serde_json::{json, Value};

use crate::error::MailError;

pub const SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Everything a redemption confirmation mentions.
#[derive(Debug, Clone)]
pub struct RedemptionEmail<'a> {
    pub to: &'a str,
    pub reward_title: &'a str,
    pub credits: i32,
    pub user_id: &'a str,
}

pub struct Mailer {
    client: reqwest::Client,
    api_key: String,
    from_email: String,
}

impl Mailer {
    /// Create a mailer from SENDGRID_API_KEY and FROM_EMAIL. Either one
    /// missing means email is not configured for this deployment.
    pub fn from_env() -> Result<Self, MailError> {
        let api_key = std::env::var("SENDGRID_API_KEY").map_err(|_| MailError::NotConfigured)?;
        let from_email = std::env::var("FROM_EMAIL").map_err(|_| MailError::NotConfigured)?;
        Ok(Self::new(api_key, from_email))
    }

    pub fn new(api_key: String, from_email: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            from_email,
        }
    }

    pub async fn send_redemption(&self, email: &RedemptionEmail<'_>) -> Result<(), MailError> {
        let payload = build_redemption_payload(&self.from_email, email);

        let response = self
            .client
            .post(SEND_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(to = email.to, reward = email.reward_title, "redemption email sent");
        Ok(())
    }
}

fn build_redemption_payload(from_email: &str, email: &RedemptionEmail<'_>) -> Value {
    let subject = format!("Your EcoLife Reward: {}", email.reward_title);
    let text = format!(
        "Hi!\n\nThanks for redeeming: {}.\nCredits used: {}.\nUser: {}.\n\nWe will process your reward shortly.\n\n— EcoLife Team",
        email.reward_title, email.credits, email.user_id
    );
    let html = format!(
        "<div style=\"font-family:Arial,sans-serif;line-height:1.5;color:#0f172a\">\
         <h2>Reward Redeemed 🎉</h2>\
         <p>Thanks for redeeming <strong>{}</strong>.</p>\
         <p><strong>Credits used:</strong> {}</p>\
         <p><strong>User ID:</strong> {}</p>\
         <p>We will process your reward shortly.</p>\
         <hr/>\
         <p style=\"color:#64748b\">EcoLife</p>\
         </div>",
        email.reward_title, email.credits, email.user_id
    );

    json!({
        "personalizations": [{ "to": [{ "email": email.to }] }],
        "from": { "email": from_email },
        "subject": subject,
        "content": [
            { "type": "text/plain", "value": text },
            { "type": "text/html", "value": html }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_redemption_payload() {
        let email = RedemptionEmail {
            to: "user@example.com",
            reward_title: "Eco Water Bottle",
            credits: 50,
            user_id: "abc-123",
        };
        let payload = build_redemption_payload("rewards@ecolife.test", &email);

        assert_eq!(
            payload["personalizations"][0]["to"][0]["email"],
            "user@example.com"
        );
        assert_eq!(payload["from"]["email"], "rewards@ecolife.test");
        assert_eq!(payload["subject"], "Your EcoLife Reward: Eco Water Bottle");

        assert_eq!(payload["content"][0]["type"], "text/plain");
        let text = payload["content"][0]["value"].as_str().unwrap();
        assert!(text.contains("Eco Water Bottle"));
        assert!(text.contains("Credits used: 50"));
        assert!(text.contains("abc-123"));

        assert_eq!(payload["content"][1]["type"], "text/html");
        assert!(payload["content"][1]["value"]
            .as_str()
            .unwrap()
            .contains("<strong>Eco Water Bottle</strong>"));
    }
}
