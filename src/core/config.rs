use std::env;
use std::str::FromStr;

use crate::errors::JmsError;

/// How the decoder treats a message carrying only one of the two reply-to attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplyToPolicy {
    /// Treat the reply-to as absent.
    #[default]
    Lenient,
    /// Fail with `JmsError::MalformedReplyTo`.
    Strict,
}

impl FromStr for ReplyToPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown reply-to policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JmsConfig {
    pub reply_to_policy: ReplyToPolicy,
    pub receive_max_messages: Option<i32>,
    pub receive_wait_seconds: Option<i32>,
    pub message_attribute_names: Vec<String>,
}

impl JmsConfig {
    /// # Errors
    ///
    /// `JmsError::Config` naming the offending variable.
    pub fn from_env() -> Result<Self, JmsError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// `JmsError::Config` naming the offending key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, JmsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::parse(&lookup).map_err(JmsError::Config)
    }

    fn parse<F>(lookup: &F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let reply_to_policy = match lookup("JMS_REPLY_TO_POLICY") {
            Some(v) => v
                .parse()
                .map_err(|e| format!("JMS_REPLY_TO_POLICY: {}", e))?,
            None => ReplyToPolicy::default(),
        };
        let receive_max_messages =
            parse_bounded(lookup, "JMS_RECEIVE_MAX_MESSAGES", 1, 10)?;
        let receive_wait_seconds =
            parse_bounded(lookup, "JMS_RECEIVE_WAIT_SECONDS", 0, 20)?;
        let message_attribute_names = lookup("JMS_MESSAGE_ATTRIBUTE_NAMES")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            reply_to_policy,
            receive_max_messages,
            receive_wait_seconds,
            message_attribute_names,
        })
    }
}

fn parse_bounded<F>(lookup: &F, key: &str, min: i32, max: i32) -> Result<Option<i32>, String>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value: i32 = raw
        .trim()
        .parse()
        .map_err(|e| format!("{}: {}", key, e))?;
    if !(min..=max).contains(&value) {
        return Err(format!("{key}: {value} is outside {min}..={max}"));
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = JmsConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.reply_to_policy, ReplyToPolicy::Lenient);
        assert_eq!(config.receive_max_messages, None);
        assert!(config.message_attribute_names.is_empty());
    }

    #[test]
    fn parses_all_settings() {
        let config = JmsConfig::from_lookup(lookup_from(&[
            ("JMS_REPLY_TO_POLICY", "Strict"),
            ("JMS_RECEIVE_MAX_MESSAGES", "10"),
            ("JMS_RECEIVE_WAIT_SECONDS", "20"),
            ("JMS_MESSAGE_ATTRIBUTE_NAMES", "tenant, trace ,"),
        ]))
        .unwrap();
        assert_eq!(config.reply_to_policy, ReplyToPolicy::Strict);
        assert_eq!(config.receive_max_messages, Some(10));
        assert_eq!(config.receive_wait_seconds, Some(20));
        assert_eq!(config.message_attribute_names, vec!["tenant", "trace"]);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = JmsConfig::from_lookup(lookup_from(&[("JMS_RECEIVE_MAX_MESSAGES", "11")]))
            .unwrap_err();
        assert!(
            matches!(err, JmsError::Config(ref msg) if msg == "JMS_RECEIVE_MAX_MESSAGES: 11 is outside 1..=10")
        );
        assert_eq!(
            err.to_string(),
            "Invalid configuration: JMS_RECEIVE_MAX_MESSAGES: 11 is outside 1..=10"
        );

        let err =
            JmsConfig::from_lookup(lookup_from(&[("JMS_REPLY_TO_POLICY", "loose")])).unwrap_err();
        assert!(matches!(err, JmsError::Config(ref msg) if msg.contains("unknown reply-to policy")));

        let err = JmsConfig::from_lookup(lookup_from(&[("JMS_RECEIVE_WAIT_SECONDS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, JmsError::Config(ref msg) if msg.starts_with("JMS_RECEIVE_WAIT_SECONDS: ")));
    }
}
