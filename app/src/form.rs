//! The interactive terminal form.
//!
//! # Design
//! The controller lives on the task running `Form::run`. Each submission is
//! spawned into a `JoinSet` owned by the form, so the controller is only
//! ever touched from one place and the loop never blocks on the network.
//! Submissions are not cancelled: a new line while a request is in flight
//! starts another request, and the controller's `OrderingPolicy` decides
//! which completions are shown. Requests outlive a single `run`; whatever
//! is still outstanding when one run stops is picked up by the next.

use std::collections::HashMap;
use std::sync::Arc;

use sentiment_core::{
    render, ApiError, Completion, Controller, HttpResponse, PendingAnalysis, RequestId, Screen,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::{self, JoinSet};

use crate::transport::Transport;

type Outcome = (RequestId, Result<HttpResponse, ApiError>);

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the input text and analyze it.
    Text(String),
    /// Analyze the current input text again.
    Again,
    Quit,
}

pub fn parse_command(line: &str) -> Command {
    match line.trim() {
        ":again" => Command::Again,
        ":quit" | ":q" => Command::Quit,
        _ => Command::Text(line.to_string()),
    }
}

/// Strip the line terminator and decode. Lines that are not UTF-8 are
/// logged and dropped.
fn decode_line(mut raw: Vec<u8>) -> Option<String> {
    if raw.last() == Some(&b'\n') {
        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
    }
    match String::from_utf8(raw) {
        Ok(line) => Some(line),
        Err(e) => {
            tracing::warn!(error = %e, bytes = e.as_bytes().len(), "skipping input line that is not UTF-8");
            None
        }
    }
}

pub struct Form<T> {
    controller: Controller,
    transport: Arc<T>,
    tasks: JoinSet<Outcome>,
    requests: HashMap<task::Id, RequestId>,
}

impl<T> Form<T>
where
    T: Transport + 'static,
{
    pub fn new(controller: Controller, transport: T) -> Self {
        Self {
            controller,
            transport: Arc::new(transport),
            tasks: JoinSet::new(),
            requests: HashMap::new(),
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run a single attempt for `text` and return what the form shows
    /// afterwards.
    pub async fn analyze_once(&mut self, text: &str) -> Screen {
        self.controller.edit(text);
        if let Ok(PendingAnalysis { id, request }) = self.controller.request_analysis() {
            let outcome = self.transport.execute(request).await;
            self.controller.complete(id, outcome);
        }
        render(self.controller.state())
    }

    /// Read commands from `input` until `:quit` or end of input, writing
    /// the rendered form to `output` whenever an outcome is applied.
    ///
    /// On end of input, every outstanding request is awaited and applied,
    /// including ones left over from an earlier run. On `:quit` the loop
    /// returns at once and outstanding requests keep running.
    pub async fn run<R, W>(&mut self, mut input: R, mut output: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        let mut input_open = true;

        loop {
            if !input_open && self.tasks.is_empty() {
                break;
            }

            tokio::select! {
                read = input.read_until(b'\n', &mut buf), if input_open => {
                    if read? == 0 {
                        tracing::debug!(in_flight = self.controller.in_flight(), "input closed");
                        input_open = false;
                    }
                    if buf.is_empty() {
                        continue;
                    }
                    let Some(line) = decode_line(std::mem::take(&mut buf)) else {
                        continue;
                    };
                    if !self.handle_line(&line, &mut output).await? {
                        break;
                    }
                }
                Some(joined) = self.tasks.join_next_with_id(), if !self.tasks.is_empty() => {
                    let Some((id, outcome)) = self.finished(joined) else {
                        continue;
                    };
                    if self.controller.complete(id, outcome) == Completion::Applied {
                        write_screen(&mut output, &render(self.controller.state())).await?;
                    }
                }
            }
        }

        if !self.tasks.is_empty() {
            tracing::debug!(in_flight = self.tasks.len(), "leaving requests in flight");
        }
        Ok(())
    }

    /// Returns false on `:quit`.
    async fn handle_line<W>(&mut self, line: &str, output: &mut W) -> anyhow::Result<bool>
    where
        W: AsyncWrite + Unpin,
    {
        match parse_command(line) {
            Command::Quit => return Ok(false),
            Command::Again => {}
            Command::Text(text) => self.controller.edit(text),
        }
        if !self.submit() {
            write_screen(output, &render(self.controller.state())).await?;
        }
        Ok(true)
    }

    /// Map a joined task back to its request. A task that panicked or was
    /// aborted counts as a failed request.
    fn finished(&mut self, joined: Result<(task::Id, Outcome), task::JoinError>) -> Option<Outcome> {
        match joined {
            Ok((task_id, outcome)) => {
                self.requests.remove(&task_id);
                Some(outcome)
            }
            Err(err) => {
                let id = self.requests.remove(&err.id())?;
                tracing::error!(request = %id, error = %err, "request task failed");
                Some((id, Err(ApiError::Transport(format!("request task failed: {err}")))))
            }
        }
    }

    /// Issue a request for the current input. Returns false when the
    /// request could not even be built; the failure is already in the
    /// controller's state.
    fn submit(&mut self) -> bool {
        let Ok(PendingAnalysis { id, request }) = self.controller.request_analysis() else {
            return false;
        };
        let transport = Arc::clone(&self.transport);
        let handle = self.tasks.spawn(async move { (id, transport.execute(request).await) });
        self.requests.insert(handle.id(), id);
        true
    }
}

async fn write_screen<W>(output: &mut W, screen: &Screen) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(screen.to_string().as_bytes()).await?;
    output.flush().await
}
