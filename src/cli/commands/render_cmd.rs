//! The render command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use tokio::io::AsyncReadExt;

use typewriter::config::{Config, PacingConfig};
use typewriter::render::{
    render, CancelToken, MountTarget, OutputDocument, RenderOptions, TerminalTarget, Update,
};
use typewriter::RenderError;

use super::PacingArgs;
use crate::cli::icons::{dim_arrow, warn};

/// Where the markup comes from.
#[derive(Debug)]
pub enum MarkupSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

impl MarkupSource {
    pub fn from_args(markup: Option<String>, file: Option<PathBuf>) -> Self {
        match (markup, file) {
            (Some(markup), _) => MarkupSource::Inline(markup),
            (None, Some(path)) => MarkupSource::File(path),
            (None, None) => MarkupSource::Stdin,
        }
    }

    async fn read(self) -> anyhow::Result<String> {
        match self {
            MarkupSource::Inline(markup) => Ok(markup),
            MarkupSource::File(path) => {
                let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
                tokio::fs::read_to_string(&expanded)
                    .await
                    .with_context(|| format!("Failed to read markup file: {}", expanded))
            }
            MarkupSource::Stdin => {
                let mut markup = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut markup)
                    .await
                    .context("Failed to read markup from stdin")?;
                Ok(markup)
            }
        }
    }
}

/// How the target is set up.
#[derive(Debug, Clone, Copy)]
pub struct RenderMode {
    pub input: bool,
    pub clear: bool,
    pub html: bool,
}

impl RenderMode {
    fn root_tag(&self) -> &'static str {
        if self.input {
            "textarea"
        } else {
            "div"
        }
    }
}

/// Reveal markup in the terminal, or into an in-memory document with `--html`.
pub async fn cmd_render(
    config: &Config,
    source: MarkupSource,
    mode: RenderMode,
    args: &PacingArgs,
) -> anyhow::Result<()> {
    let markup = source.read().await?;
    let mut pacing = args.apply(config.render.clone());
    pacing.clear_first |= mode.clear;

    let token = CancelToken::new();
    let ctrl_c = watch_ctrl_c(&token);
    let deadline = args
        .timeout
        .map(|secs| token.cancel_after(Duration::from_secs(secs)));

    let result = if mode.html {
        let mut document = OutputDocument::new(mode.root_tag());
        let outcome = reveal(&mut document, &markup, &pacing, &token).await;
        let root = document.root();
        if mode.input {
            println!("{}", document.value(root));
        } else {
            println!("{}", document.inner_html(root));
        }
        outcome
    } else {
        let mut terminal = TerminalTarget::new(std::io::stdout(), mode.root_tag());
        let outcome = reveal(&mut terminal, &markup, &pacing, &token).await;
        terminal.finish().context("Failed to write to terminal")?;
        outcome
    };

    ctrl_c.abort();
    if let Some(handle) = deadline {
        handle.abort();
    }

    match result {
        Ok(_) => Ok(()),
        Err((RenderError::Cancelled, revealed)) => {
            eprintln!("{} Cancelled after {} characters", warn(), revealed);
            Ok(())
        }
    }
}

/// Render with configured pacing, counting revealed characters even on cancellation.
async fn reveal<T: MountTarget>(
    target: &mut T,
    markup: &str,
    pacing: &PacingConfig,
    token: &CancelToken,
) -> Result<usize, (RenderError, usize)> {
    let mut revealed = 0usize;
    let options = RenderOptions::new()
        .clear_first(pacing.clear_first)
        .pacing(pacing.pacing())
        .delay_policy(pacing.delay_policy())
        .cancel_token(token)
        .on_update(|update: Update<T::Handle>| {
            if update.ch.is_some() {
                revealed += 1;
            }
        });

    let outcome = render(target, markup, options).await;
    match outcome {
        Ok(summary) => {
            tracing::info!(
                "Revealed {} characters in {} elements",
                summary.chars,
                summary.elements
            );
            Ok(summary.chars)
        }
        Err(e) => Err((e, revealed)),
    }
}

/// Cancel `token` when Ctrl-C is pressed.
fn watch_ctrl_c(token: &CancelToken) -> tokio::task::JoinHandle<()> {
    let token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n{} Interrupted, stopping", dim_arrow());
            token.cancel();
        }
    })
}
