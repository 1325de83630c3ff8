//! Per-participant chat channel selection

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use windfall_core::ParticipantId;
use windfall_script::MessageTable;

/// A chat channel a participant can talk in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChatChannel {
    #[default]
    Global,
    Local,
    Civilisation,
    Staff,
}

impl ChatChannel {
    pub const ALL: [ChatChannel; 4] = [
        ChatChannel::Global,
        ChatChannel::Local,
        ChatChannel::Civilisation,
        ChatChannel::Staff,
    ];

    /// Message template used to render a line in this channel
    pub fn message_key(&self) -> &'static str {
        match self {
            ChatChannel::Global => "chat.global",
            ChatChannel::Local => "chat.local",
            ChatChannel::Civilisation => "chat.civilisation",
            ChatChannel::Staff => "chat.staff",
        }
    }

    /// Render `text` with this channel's template
    pub fn render(&self, messages: &MessageTable, text: &str) -> String {
        messages.format(self.message_key(), &[&text])
    }
}

impl fmt::Display for ChatChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChatChannel::Global => "GLOBAL",
            ChatChannel::Local => "LOCAL",
            ChatChannel::Civilisation => "CIVILISATION",
            ChatChannel::Staff => "STAFF",
        };
        f.write_str(name)
    }
}

impl FromStr for ChatChannel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChatChannel::ALL
            .into_iter()
            .find(|channel| channel.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::not_found("Chat channel", s))
    }
}

/// Which channel each participant is talking in
///
/// Participants without a selection are in [`ChatChannel::Global`].
#[derive(Debug, Clone, Default)]
pub struct ChannelRegistry {
    selections: HashMap<ParticipantId, ChatChannel>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch a participant's channel, returning the previous one
    pub fn select(&mut self, participant: ParticipantId, channel: ChatChannel) -> ChatChannel {
        self.selections
            .insert(participant, channel)
            .unwrap_or_default()
    }

    /// Current channel of a participant
    pub fn channel_of(&self, participant: ParticipantId) -> ChatChannel {
        self.selections
            .get(&participant)
            .copied()
            .unwrap_or_default()
    }

    /// Drop a participant's selection (e.g. on disconnect)
    pub fn forget(&mut self, participant: ParticipantId) {
        self.selections.remove(&participant);
    }

    /// Participants currently in `channel`, ignoring those on the default
    pub fn members_of(&self, channel: ChatChannel) -> Vec<ParticipantId> {
        let mut members: Vec<_> = self
            .selections
            .iter()
            .filter(|(_, c)| **c == channel)
            .map(|(p, _)| *p)
            .collect();
        members.sort();
        members
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}
