//! Per-action in-flight flags. A second submission of the same action while the
//! first is still running is refused instead of issuing a duplicate request.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Action, ClientError};

#[derive(Default)]
pub struct InFlight {
  quiz: AtomicBool,
  widget_chat: AtomicBool,
  assistant_chat: AtomicBool,
  upload: AtomicBool,
}

impl InFlight {
  pub fn new() -> Self {
    Self::default()
  }

  fn flag(&self, action: Action) -> &AtomicBool {
    match action {
      Action::Quiz => &self.quiz,
      Action::WidgetChat => &self.widget_chat,
      Action::AssistantChat => &self.assistant_chat,
      Action::Upload => &self.upload,
    }
  }

  /// Claim `action`; the flag clears when the returned token drops.
  pub fn acquire(&self, action: Action) -> Result<InFlightToken<'_>, ClientError> {
    let flag = self.flag(action);
    flag
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .map_err(|_| ClientError::Busy(action))?;
    Ok(InFlightToken { flag })
  }

  pub fn is_busy(&self, action: Action) -> bool {
    self.flag(action).load(Ordering::Acquire)
  }
}

pub struct InFlightToken<'a> {
  flag: &'a AtomicBool,
}

impl Drop for InFlightToken<'_> {
  fn drop(&mut self) {
    self.flag.store(false, Ordering::Release);
  }
}
