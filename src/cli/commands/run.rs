//! Run command - Answer a flow interactively
//!
//! Chat mode prints the conversation one bot message at a time; form mode
//! shows a numbered page per visible step and understands `back`.

use std::io::Write;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use crate::cli::prompt::{parse_line, render_step};
use crate::cli::Context;
use crate::errors::{IntakeError, Result};
use crate::schemas::UiMode;
use crate::session::{Advance, ChatSession, CompletionSink, FormSession, RawInput, Role};
use crate::store::{MemoryStore, TaskStore};

/// Word that moves a form back one page
pub const BACK_COMMAND: &str = "back";

/// Answer a flow over stdin/stdout
pub async fn run(ctx: &Context, flow_id: &str, mode: Option<UiMode>) -> Result<()> {
    let registry = ctx.registry()?;
    let flow = match registry.get(flow_id) {
        Ok(flow) => flow,
        Err(e) => {
            let known: Vec<&str> = registry.list().iter().map(|f| f.id.as_str()).collect();
            eprintln!("Available flows: {}", known.join(", "));
            return Err(e);
        }
    };

    let mode = match mode {
        Some(mode) => mode,
        None => ctx.preferences().ui_mode()?,
    };
    tracing::info!(flow = %flow.id, %mode, "starting session");

    let mut sink: Box<dyn CompletionSink> = if ctx.dry_run {
        Box::new(TaskStore::open(MemoryStore::new(), ctx.config.task_total_steps)?)
    } else {
        Box::new(ctx.task_store()?)
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = std::io::stdout();

    writeln!(out, "{}", flow.name)?;
    let task_id = match mode {
        UiMode::Chat => {
            let mut session = ChatSession::new(flow, sink.as_mut());
            let delay = Duration::from_millis(ctx.config.typing_delay_ms);
            drive_chat(&mut session, &mut lines, &mut out, delay).await?;
            session.task_id().map(str::to_string)
        }
        UiMode::Form => {
            let mut session = FormSession::open(flow, sink.as_mut())?;
            drive_form(&mut session, &mut lines, &mut out).await?;
            session.task_id().map(str::to_string)
        }
    };

    if let Some(id) = task_id {
        if ctx.dry_run {
            writeln!(out, "Dry run: task {} was not saved", id)?;
        } else {
            writeln!(out, "Created task {}", id)?;
        }
    }
    Ok(())
}

async fn read_line<R>(lines: &mut Lines<R>) -> Result<String>
where
    R: AsyncBufRead + Unpin,
{
    match lines.next_line().await? {
        Some(line) => Ok(line),
        None => Err(IntakeError::Interrupted),
    }
}

/// Run a chat session until it completes or input ends
pub async fn drive_chat<R, W>(
    session: &mut ChatSession<'_>,
    lines: &mut Lines<R>,
    out: &mut W,
    delay: Duration,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    session.start()?;
    let mut shown = 0;

    loop {
        // Bot and system lines appended since the last prompt
        let flow = session.flow();
        for message in &session.transcript()[shown..] {
            match message.role {
                Role::User => continue,
                Role::Bot | Role::System => {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
            match message.step_id.as_deref().and_then(|id| flow.step(id)) {
                Some(step) if message.role == Role::Bot => render_step(out, step, None)?,
                _ => writeln!(out, "{}", message.content)?,
            }
        }
        shown = session.transcript().len();
        out.flush()?;

        let step = match session.current_step() {
            Some(step) => step,
            None => return Ok(()),
        };
        let line = read_line(lines).await?;
        match session.submit(parse_line(step, &line)) {
            Ok(_) => {}
            Err(e) if e.is_answer_rejection() => writeln!(out, "{}", e)?,
            Err(e) => return Err(e),
        }
    }
}

/// Run a form session until it completes or input ends
pub async fn drive_form<R, W>(
    session: &mut FormSession<'_>,
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    while let Some(step) = session.current_step() {
        writeln!(
            out,
            "\nStep {} of {} ({}% complete)",
            session.step_number(),
            session.total_visible_steps(),
            session.progress_percent()
        )?;
        let prefill = session.prefill().cloned();
        render_step(out, step, prefill.as_ref())?;
        if !session.is_first() {
            writeln!(out, "  (type '{}' for the previous step)", BACK_COMMAND)?;
        }
        out.flush()?;

        let line = read_line(lines).await?;
        if line.trim().eq_ignore_ascii_case(BACK_COMMAND) {
            if !session.go_back() {
                writeln!(out, "Already on the first step.")?;
            }
            continue;
        }

        let raw = match &prefill {
            Some(answer) if line.trim().is_empty() => RawInput::from(answer),
            _ => parse_line(step, &line),
        };
        match session.go_next(raw) {
            Ok(Advance::Completed { .. }) => writeln!(out, "\nAll done, thank you!")?,
            Ok(_) => {}
            Err(e) if e.is_answer_rejection() => writeln!(out, "{}", e)?,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
