//! The typewriter engine.
//!
//! Rebuilds a markup fragment inside a mount target while revealing its text
//! one character at a time. The walk is a single task: it suspends only for
//! the start delay, per-character delays and whitespace pauses, and checks
//! the cancellation token at each of those points and between nodes.

use std::time::Duration;

use tracing::{debug, trace};

use super::cancel::CancelToken;
use super::delay::{DelayPolicy, NoDelay, RandomDelay};
use super::target::MountTarget;
use crate::error::{RenderError, RenderResult};
use crate::markup::{self, FragmentNode};

/// Default pause before the first character.
pub const DEFAULT_START_DELAY: Duration = Duration::from_millis(150);
/// Default lower bound of the per-character delay.
pub const DEFAULT_MIN_DELAY: Duration = Duration::ZERO;
/// Default upper bound of the per-character delay.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(3);

/// Notification sent after each revealed character or void element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Update<H> {
    /// Output node that was written to.
    pub node: H,
    /// Revealed character, `None` for a void element placement.
    pub ch: Option<char>,
}

/// Timing bounds of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub start_delay: Duration,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            start_delay: DEFAULT_START_DELAY,
            min_delay: DEFAULT_MIN_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl Pacing {
    /// No pauses at all.
    pub fn instant() -> Self {
        Self {
            start_delay: Duration::ZERO,
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Per-character bounds in ascending order.
    fn char_bounds(&self) -> (Duration, Duration) {
        if self.min_delay <= self.max_delay {
            (self.min_delay, self.max_delay)
        } else {
            (self.max_delay, self.min_delay)
        }
    }
}

/// Counts reported by a completed render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Characters revealed.
    pub chars: usize,
    /// Output elements created.
    pub elements: usize,
    /// Childless elements placed without a reveal.
    pub void_elements: usize,
}

/// Options for a single render call.
pub struct RenderOptions<'a, H> {
    clear_first: bool,
    pacing: Pacing,
    on_update: Option<Box<dyn FnMut(Update<H>) + 'a>>,
    cancel: Option<&'a CancelToken>,
    delay_policy: Box<dyn DelayPolicy + 'a>,
}

impl<'a, H> RenderOptions<'a, H> {
    /// Default pacing with an entropy-seeded random delay policy.
    pub fn new() -> Self {
        Self {
            clear_first: false,
            pacing: Pacing::default(),
            on_update: None,
            cancel: None,
            delay_policy: Box::new(RandomDelay::from_entropy()),
        }
    }

    /// Options that reveal everything without pausing.
    pub fn instant() -> Self {
        Self::new()
            .pacing(Pacing::instant())
            .delay_policy(NoDelay)
    }

    /// Clear the target before rendering.
    pub fn clear_first(mut self, clear: bool) -> Self {
        self.clear_first = clear;
        self
    }

    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn start_delay(mut self, delay: Duration) -> Self {
        self.pacing.start_delay = delay;
        self
    }

    /// Inclusive bounds of the per-character delay.
    pub fn char_delay(mut self, min: Duration, max: Duration) -> Self {
        self.pacing.min_delay = min;
        self.pacing.max_delay = max;
        self
    }

    pub fn on_update(mut self, callback: impl FnMut(Update<H>) + 'a) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    pub fn cancel_token(mut self, token: &'a CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn delay_policy(mut self, policy: impl DelayPolicy + 'a) -> Self {
        self.delay_policy = Box::new(policy);
        self
    }
}

impl<H> Default for RenderOptions<'_, H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `markup` into `target`, revealing text one character at a time.
///
/// Input-like targets (`input`, `textarea`) receive the markup's text content
/// in their value. Any other target gets the markup's element structure with
/// `on*` attributes removed. On cancellation the partial output is left in
/// place.
pub async fn render<T: MountTarget>(
    target: &mut T,
    markup: &str,
    options: RenderOptions<'_, T::Handle>,
) -> RenderResult<RenderSummary> {
    let mut typewriter = Typewriter {
        target,
        options,
        start_pending: true,
        summary: RenderSummary::default(),
    };
    let result = typewriter.run(markup).await;

    match &result {
        Ok(summary) => debug!(
            "Render complete: {} chars, {} elements ({} void)",
            summary.chars, summary.elements, summary.void_elements
        ),
        Err(RenderError::Cancelled) => debug!(
            "Render cancelled after {} chars",
            typewriter.summary.chars
        ),
    }
    result
}

struct Typewriter<'t, 'a, T: MountTarget> {
    target: &'t mut T,
    options: RenderOptions<'a, T::Handle>,
    /// Set until the first text reveal has paid the start delay.
    start_pending: bool,
    summary: RenderSummary,
}

impl<T: MountTarget> Typewriter<'_, '_, T> {
    async fn run(&mut self, markup: &str) -> RenderResult<RenderSummary> {
        self.check_cancelled()?;

        let root = self.target.root();
        if self.options.clear_first {
            self.target.clear(root);
        }

        if self.target.is_input_like(root) {
            debug!("Rendering {} bytes of markup into a text control", markup.len());
            let text = markup::text_content(markup);
            self.type_text(root, &text).await?;
        } else {
            debug!("Rendering {} bytes of markup", markup.len());
            let nodes = markup::parse_fragment(markup);
            self.walk(root, &nodes).await?;
        }

        Ok(self.summary)
    }

    async fn walk(&mut self, parent: T::Handle, nodes: &[FragmentNode]) -> RenderResult<()> {
        for node in nodes {
            self.check_cancelled()?;

            match node {
                FragmentNode::Text(text) => self.type_text(parent, text).await?,
                FragmentNode::Element(element) => {
                    let child = self.target.append_element(parent, &element.tag);
                    for (name, value) in element.safe_attributes() {
                        self.target.set_attribute(child, name, value);
                    }
                    self.summary.elements += 1;
                    trace!("Placed <{}> under {:?}", element.tag, parent);

                    if element.is_childless() {
                        self.summary.void_elements += 1;
                        self.notify(child, None);
                        continue;
                    }

                    Box::pin(self.walk(child, &element.children)).await?;
                }
            }
        }
        Ok(())
    }

    async fn type_text(&mut self, node: T::Handle, text: &str) -> RenderResult<()> {
        if std::mem::take(&mut self.start_pending) {
            self.pause(self.options.pacing.start_delay).await?;
        }

        for ch in text.chars() {
            self.reveal_char(node, ch).await?;

            if is_pause_whitespace(ch) {
                let pause = self.options.delay_policy.whitespace_delay();
                self.pause(pause).await?;
            }
        }
        Ok(())
    }

    /// Wait the per-character delay, then append exactly one character.
    async fn reveal_char(&mut self, node: T::Handle, ch: char) -> RenderResult<()> {
        self.check_cancelled()?;

        let (min, max) = self.options.pacing.char_bounds();
        let delay = self.options.delay_policy.char_delay(min, max);
        self.pause(delay).await?;

        self.target.push_char(node, ch);
        self.summary.chars += 1;
        self.notify(node, Some(ch));
        Ok(())
    }

    fn notify(&mut self, node: T::Handle, ch: Option<char>) {
        if let Some(callback) = self.options.on_update.as_mut() {
            callback(Update { node, ch });
        }
    }

    fn check_cancelled(&self) -> RenderResult<()> {
        match self.options.cancel {
            Some(token) if token.is_cancelled() => Err(RenderError::Cancelled),
            _ => Ok(()),
        }
    }

    /// Suspend for `delay`, failing if the token is or becomes cancelled.
    async fn pause(&self, delay: Duration) -> RenderResult<()> {
        self.check_cancelled()?;

        let Some(token) = self.options.cancel else {
            sleep_or_yield(delay).await;
            return Ok(());
        };

        tokio::select! {
            biased;
            _ = token.cancelled() => Err(RenderError::Cancelled),
            _ = sleep_or_yield(delay) => Ok(()),
        }
    }
}

/// Characters followed by a whitespace pause: Unicode `White_Space` plus
/// U+FEFF, without U+0085.
fn is_pause_whitespace(ch: char) -> bool {
    match ch {
        '\u{feff}' => true,
        '\u{85}' => false,
        _ => ch.is_whitespace(),
    }
}

async fn sleep_or_yield(delay: Duration) {
    if delay.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(delay).await;
    }
}
