//! Conventions shared by every Azure Cognitive Services client.

/// Header carrying the subscription key on each outbound request.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
