use crate::error::FeedbackError;
use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Optional price bounds. `lower <= upper` is not enforced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub price_upper_limit: Option<i64>,
    pub price_lower_limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedbackPayload {
    #[serde(deserialize_with = "deserialize_price")]
    pub price: i64,
    pub name: String,
    /// Free text from the sender. Never inspected, so any JSON value is accepted.
    #[serde(default)]
    pub message: Option<Value>,
}

/// SNS notification as delivered through an SQS subscription.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Notification {
    pub message: String,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub topic_arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseMessage {
    Allowance { name: String },
    TooExpensive { name: String, price: i64, limit: i64 },
    TooCheap { name: String, price: i64, limit: i64 },
}

impl ResponseMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseMessage::Allowance { .. } => "allowance",
            ResponseMessage::TooExpensive { .. } => "too_expensive",
            ResponseMessage::TooCheap { .. } => "too_cheap",
        }
    }
}

impl fmt::Display for ResponseMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseMessage::TooExpensive { name, price, limit } => write!(
                f,
                "ご連絡ありがとうございます。\n\
                 申し訳ないのですが、ご連絡頂いた商品({name})の価格({price}円)では、\n\
                 当方の予算({limit}円)を超過しております。\n\
                 できれば今後は当方の要件にあった情報をお渡しいただきたく思います。\n"
            ),
            ResponseMessage::TooCheap { name, price, limit } => write!(
                f,
                "ご連絡ありがとうございます。\n\
                 ご連絡頂いた商品({name})の価格({price}円)では、\n\
                 当方の希望する価格({limit}円以上)よりも安価に過ぎます。\n\
                 もっと付加価値の伴ったものを提案いただきたく考えています。\n"
            ),
            ResponseMessage::Allowance { name } => write!(
                f,
                "ご連絡ありがとうございます。\n\
                 ご連絡頂いた商品({name})ですが、\n\
                 当方の希望する価格とマッチしており、\n\
                 より詳細な話をお聞きしたく考えています。\n"
            ),
        }
    }
}

/// Picks the canned response for a payload. A price equal to a limit is accepted.
pub fn classify(payload: &FeedbackPayload, thresholds: &Thresholds) -> ResponseMessage {
    if let Some(limit) = thresholds.price_upper_limit {
        if payload.price > limit {
            return ResponseMessage::TooExpensive {
                name: payload.name.clone(),
                price: payload.price,
                limit,
            };
        }
    }

    if let Some(limit) = thresholds.price_lower_limit {
        if payload.price < limit {
            return ResponseMessage::TooCheap {
                name: payload.name.clone(),
                price: payload.price,
                limit,
            };
        }
    }

    ResponseMessage::Allowance {
        name: payload.name.clone(),
    }
}

/// A record body unwrapped down to the feedback payload.
///
/// `raw` is the inner JSON exactly as decoded, so re-encoding it keeps every key
/// the sender supplied (in order), not only the fields the classifier reads.
#[derive(Debug)]
pub struct DecodedFeedback {
    pub notification_id: Option<String>,
    pub subject: Option<String>,
    pub payload: FeedbackPayload,
    raw: Value,
}

impl DecodedFeedback {
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, FeedbackError> {
        serde_json::to_vec(&self.raw).map_err(FeedbackError::Payload)
    }
}

pub fn decode_record_body(body: &str) -> Result<DecodedFeedback, FeedbackError> {
    let notification: Notification =
        serde_json::from_str(body).map_err(FeedbackError::Envelope)?;
    let raw: Value =
        serde_json::from_str(&notification.message).map_err(FeedbackError::Payload)?;
    let payload = FeedbackPayload::deserialize(&raw).map_err(FeedbackError::Payload)?;

    Ok(DecodedFeedback {
        notification_id: notification.message_id,
        subject: notification.subject,
        payload,
        raw,
    })
}

// Accepts 25000000, 25000000.0 and "25000000".
fn deserialize_price<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Integer(i64),
        Float(f64),
        Text(String),
    }

    match RawPrice::deserialize(deserializer)? {
        RawPrice::Integer(price) => Ok(price),
        RawPrice::Float(price) if price.is_finite() && price.abs() < i64::MAX as f64 => {
            Ok(price.trunc() as i64)
        }
        RawPrice::Float(price) => Err(D::Error::custom(format!(
            "price {} cannot be converted to an integer",
            price
        ))),
        RawPrice::Text(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("price {:?} is not an integer", text))),
    }
}
