// src/services/notify.rs

use serde_json::json;

const LINE_PUSH_URL: &str = "https://api.line.me/v2/bot/message/push";

// Heurística: um ObjectId legado (24 caracteres hexadecimais) gravado no
// campo de mensageria não é um destinatário válido no LINE.
pub fn looks_like_legacy_object_id(value: &str) -> bool {
    value.len() == 24 && value.chars().all(|c| c.is_ascii_hexdigit())
}

// Cliente de push da LINE Messaging API. A notificação é sempre
// melhor-esforço: falha vira log de warn, nunca erro da requisição.
#[derive(Clone)]
pub struct LineNotifier {
    http: reqwest::Client,
    channel_token: Option<String>,
}

impl LineNotifier {
    pub fn new(channel_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            channel_token,
        }
    }

    pub async fn push_text(&self, to: &str, text: &str) {
        let Some(token) = &self.channel_token else {
            tracing::debug!("LINE_CHANNEL_ACCESS_TOKEN ausente; push ignorado");
            return;
        };
        if looks_like_legacy_object_id(to) {
            tracing::debug!("Destinatário {} parece um id legado; push ignorado", to);
            return;
        }

        let body = json!({
            "to": to,
            "messages": [{ "type": "text", "text": text }],
        });

        let result = self
            .http
            .post(LINE_PUSH_URL)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {}
            Ok(resp) => {
                tracing::warn!("Push LINE rejeitado com status {}", resp.status());
            }
            Err(e) => {
                tracing::warn!("Falha ao enviar push LINE: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::looks_like_legacy_object_id;

    #[test]
    fn object_id_de_24_hex_e_barrado() {
        assert!(looks_like_legacy_object_id("5f7a3b2c1d4e5f6a7b8c9d0e"));
        assert!(looks_like_legacy_object_id("ABCDEF0123456789abcdef01"));
    }

    #[test]
    fn id_do_line_passa() {
        // IDs do LINE começam com "U" e têm 33 caracteres.
        assert!(!looks_like_legacy_object_id(
            "U4af4980629e2c0c1b2345678901234567"
        ));
        assert!(!looks_like_legacy_object_id("curto"));
        assert!(!looks_like_legacy_object_id("zzzzzzzzzzzzzzzzzzzzzzzz"));
    }
}
