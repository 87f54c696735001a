/// Where command results and status lines go
pub trait Output: Send + Sync {
    /// Status line for a completed write
    fn success(&self, message: &str);

    /// Status line for a non-fatal problem
    fn warning(&self, message: &str);

    /// The command's result (a mapping, manifest or listing)
    fn document(&self, contents: &str);
}

/// Styled terminal output: status on stderr, documents on stdout
pub struct TerminalOutput;

impl Output for TerminalOutput {
    fn success(&self, message: &str) {
        crate::output::success(message);
    }

    fn warning(&self, message: &str) {
        crate::output::warning(message);
    }

    fn document(&self, contents: &str) {
        crate::output::document(contents);
    }
}

/// Everything a command emitted, as captured by MockOutput
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum OutputMessage {
    Success(String),
    Warning(String),
    Document(String),
}

/// Records output instead of printing it
#[cfg(test)]
#[derive(Default)]
pub struct MockOutput {
    messages: std::sync::Mutex<Vec<OutputMessage>>,
}

#[cfg(test)]
impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<OutputMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn has_success(&self) -> bool {
        self.get_messages()
            .iter()
            .any(|m| matches!(m, OutputMessage::Success(_)))
    }

    pub fn has_warning(&self) -> bool {
        self.get_messages()
            .iter()
            .any(|m| matches!(m, OutputMessage::Warning(_)))
    }

    /// Documents only, in emission order
    pub fn get_documents(&self) -> Vec<String> {
        self.get_messages()
            .into_iter()
            .filter_map(|m| match m {
                OutputMessage::Document(doc) => Some(doc),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl Output for MockOutput {
    fn success(&self, message: &str) {
        let mut messages = self.messages.lock().unwrap();
        messages.push(OutputMessage::Success(message.to_string()));
    }

    fn warning(&self, message: &str) {
        let mut messages = self.messages.lock().unwrap();
        messages.push(OutputMessage::Warning(message.to_string()));
    }

    fn document(&self, contents: &str) {
        let mut messages = self.messages.lock().unwrap();
        messages.push(OutputMessage::Document(contents.to_string()));
    }
}
