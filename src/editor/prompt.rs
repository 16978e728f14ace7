use super::command::RichTextCommand;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PromptKind {
    Link,
    Image,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Link => "Insert link",
            Self::Image => "Insert image",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Link => "https://example.com",
            Self::Image => "https://example.com/image.png",
        }
    }

    fn command(self, url: String) -> RichTextCommand {
        match self {
            Self::Link => RichTextCommand::InsertLink(url),
            Self::Image => RichTextCommand::InsertImage(url),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PromptResolution {
    Confirmed(RichTextCommand),
    Cancelled,
}

/// URL entry for the link and image buttons.
///
/// Only one prompt can be open; opening another replaces it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum UrlPrompt {
    #[default]
    Idle,
    Prompting { kind: PromptKind, value: String },
}

impl UrlPrompt {
    pub fn open(&mut self, kind: PromptKind) {
        *self = Self::Prompting {
            kind,
            value: String::new(),
        };
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Prompting { .. })
    }

    pub fn kind(&self) -> Option<PromptKind> {
        match self {
            Self::Prompting { kind, .. } => Some(*kind),
            Self::Idle => None,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Prompting { value, .. } => value,
            Self::Idle => "",
        }
    }

    pub fn set_value(&mut self, input: String) {
        if let Self::Prompting { value, .. } = self {
            *value = input;
        }
    }

    /// Close the prompt. A blank URL resolves as a cancel so no command runs.
    pub fn confirm(&mut self) -> PromptResolution {
        match std::mem::take(self) {
            Self::Prompting { kind, value } => {
                let url = value.trim();
                if url.is_empty() {
                    PromptResolution::Cancelled
                } else {
                    PromptResolution::Confirmed(kind.command(url.to_string()))
                }
            }
            Self::Idle => PromptResolution::Cancelled,
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_yields_the_matching_command() {
        let mut prompt = UrlPrompt::default();
        prompt.open(PromptKind::Image);
        prompt.set_value("  https://example.com/a.png ".to_string());
        assert_eq!(
            prompt.confirm(),
            PromptResolution::Confirmed(RichTextCommand::InsertImage(
                "https://example.com/a.png".to_string()
            ))
        );
        assert!(!prompt.is_open());
    }

    #[test]
    fn blank_or_cancelled_prompts_issue_nothing() {
        let mut prompt = UrlPrompt::default();
        prompt.open(PromptKind::Link);
        prompt.set_value("   ".to_string());
        assert_eq!(prompt.confirm(), PromptResolution::Cancelled);

        prompt.open(PromptKind::Link);
        prompt.set_value("https://example.com".to_string());
        prompt.cancel();
        assert_eq!(prompt, UrlPrompt::Idle);
        assert_eq!(prompt.confirm(), PromptResolution::Cancelled);
    }

    #[test]
    fn input_is_ignored_while_idle() {
        let mut prompt = UrlPrompt::Idle;
        prompt.set_value("x".to_string());
        assert_eq!(prompt.value(), "");
        assert_eq!(prompt.kind(), None);
    }
}
