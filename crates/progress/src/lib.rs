use indicatif::{ProgressBar, ProgressStyle};
use std::borrow::Cow;
use std::time::{Duration, Instant};

/// How often should progress bars be redrawn?
pub const PROGRESS_UPDATE_INTERVAL: Duration = Duration::from_millis(500);

// NOTE: indicatif's ETA estimate is dominated by the slowest repositories and swings wildly,
//       so neither ETAs nor rates are shown.

/// Wraps an `indicatif::ProgressBar`, batching increments so that the bar is redrawn at most
/// every `PROGRESS_UPDATE_INTERVAL`.
///
/// A disabled `Progress` is backed by a hidden bar, so callers never need to check whether
/// progress reporting is on.
pub struct Progress {
    inc_since_sync: u64,
    last_sync: Instant,
    inner: ProgressBar,
    finish_style: Option<ProgressStyle>,
}

impl Progress {
    /// A spinner for work of unknown size, e.g., listing a user's repositories.
    pub fn new_spinner<T: Into<Cow<'static, str>>>(message: T, enabled: bool) -> Self {
        let inner = if enabled {
            let style = ProgressStyle::with_template("{spinner} {msg} [{elapsed_precise}]")
                .expect("progress bar style template should compile");

            let inner = ProgressBar::new_spinner()
                .with_style(style)
                .with_message(message);
            inner.enable_steady_tick(PROGRESS_UPDATE_INTERVAL);
            inner
        } else {
            ProgressBar::hidden()
        };

        let finish_style = ProgressStyle::with_template("{msg} [{elapsed_precise}]")
            .expect("progress bar style template should compile");

        Progress {
            inc_since_sync: 0,
            last_sync: Instant::now(),
            inner,
            finish_style: Some(finish_style),
        }
    }

    /// A bar counting up to `total` items, e.g., repositories processed.
    pub fn new_bar<T: Into<Cow<'static, str>>>(total: u64, message: T, enabled: bool) -> Self {
        let inner = if enabled {
            let style = ProgressStyle::with_template(
                "{msg}  {bar} {percent:>3}%  {pos}/{len}  [{elapsed_precise}]",
            )
            .expect("progress bar style template should compile");

            let inner = ProgressBar::new(total)
                .with_style(style)
                .with_message(message);
            inner.enable_steady_tick(PROGRESS_UPDATE_INTERVAL);
            inner
        } else {
            ProgressBar::hidden()
        };

        Progress {
            inc_since_sync: 0,
            last_sync: Instant::now(),
            inner,
            finish_style: None,
        }
    }

    /// Change the total of a bar, e.g., once the amount of work becomes known.
    #[inline]
    pub fn set_length(&mut self, len: u64) {
        self.inner.set_length(len);
    }

    #[inline]
    pub fn inc(&mut self, amount: u64) {
        self.inc_since_sync += amount;
        if self.last_sync.elapsed() >= PROGRESS_UPDATE_INTERVAL {
            self.sync();
        }
    }

    /// The number of increments so far, including any not yet drawn.
    #[cfg(test)]
    fn position(&self) -> u64 {
        self.inner.position() + self.inc_since_sync
    }

    pub fn finish_with_message<T: Into<Cow<'static, str>>>(&mut self, message: T) {
        self.sync();
        if let Some(style) = &self.finish_style {
            self.inner.set_style(style.clone());
        }
        self.inner.finish_with_message(message);
    }

    pub fn finish(&mut self) {
        self.sync();
        if let Some(style) = &self.finish_style {
            self.inner.set_style(style.clone());
        }
        self.inner.finish();
    }

    fn sync(&mut self) {
        self.inner.inc(self.inc_since_sync);
        self.inc_since_sync = 0;
        self.last_sync = Instant::now();
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.sync();
    }
}
