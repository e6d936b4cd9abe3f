use std::process::{Child, Command, Stdio};

use tracing::{debug, warn};

/// Pronunciation output. Playback is best effort: failures never reach the session.
pub trait Speaker {
    /// Stop any in-flight playback, then start speaking `text`.
    fn speak(&mut self, text: &str);
    fn cancel(&mut self);
}

impl<S: Speaker + ?Sized> Speaker for Box<S> {
    fn speak(&mut self, text: &str) {
        (**self).speak(text)
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }
}

/// Speaks by running an external text-to-speech program, one process per word
#[derive(Debug)]
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
    child: Option<Child>,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            child: None,
        }
    }

    pub fn is_speaking(&mut self) -> bool {
        matches!(
            self.child.as_mut().map(|c| c.try_wait()),
            Some(Ok(None))
        )
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, text: &str) {
        self.cancel();

        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => {
                debug!(program = %self.program, word = text, "speaking");
                self.child = Some(child);
            }
            Err(err) => warn!(program = %self.program, %err, "speech unavailable"),
        }
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take() {
            // already exited is fine
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Used when speech is switched off
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&mut self, _text: &str) {}

    fn cancel(&mut self) {}
}
