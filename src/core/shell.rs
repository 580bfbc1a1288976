use crate::core::reconciler::SelectionReconciler;
use crate::core::table;
use crate::domain::ports::ArtworkSource;
use crate::utils::error::{Result, TableError};
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const HELP: &str = "\
Commands:
  show                 render the current page
  next | prev          move one page
  page <n>             jump to page n
  rows <n>             change rows per page
  toggle <id>          select or deselect one artwork
  check <id,id,...>    set the checked rows of this page (also: check all, check none)
  select <n>           select the first n artworks, fetching later pages if needed
  selected             list the selection
  export csv|json      print the selection
  help                 show this text
  quit                 leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageChecks {
    All,
    None,
    Ids(Vec<u64>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Next,
    Prev,
    Page(u64),
    Rows(u64),
    Toggle(u64),
    Check(PageChecks),
    Select(i64),
    Selected,
    Export(ExportFormat),
    Help,
    Quit,
}

impl Command {
    /// Commands that may request pages from the catalog.
    pub fn fetches(&self) -> bool {
        matches!(
            self,
            Command::Next | Command::Prev | Command::Page(_) | Command::Rows(_) | Command::Select(_)
        )
    }
}

fn parse_arg<T: FromStr>(name: &str, arg: Option<&str>) -> Result<T> {
    let arg = arg.ok_or_else(|| TableError::command(format!("'{}' needs an argument", name)))?;
    arg.parse()
        .map_err(|_| TableError::command(format!("'{}' is not a valid number for '{}'", arg, name)))
}

impl FromStr for Command {
    type Err = TableError;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Err(TableError::command("empty command"));
        };
        let name = name.to_ascii_lowercase();
        let rest: Vec<&str> = parts.collect();
        let arg = rest.first().copied();

        let command = match name.as_str() {
            "show" | "s" => Command::Show,
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Prev,
            "page" => Command::Page(parse_arg("page", arg)?),
            "rows" => Command::Rows(parse_arg("rows", arg)?),
            "toggle" | "t" => Command::Toggle(parse_arg("toggle", arg)?),
            "check" => {
                let joined = rest.join(",");
                match joined.as_str() {
                    "all" => Command::Check(PageChecks::All),
                    "none" => Command::Check(PageChecks::None),
                    "" => return Err(TableError::command("check needs ids, 'all' or 'none'")),
                    ids => Command::Check(PageChecks::Ids(
                        ids.split(',')
                            .filter(|s| !s.is_empty())
                            .map(|s| parse_arg("check", Some(s)))
                            .collect::<Result<Vec<u64>>>()?,
                    )),
                }
            }
            "select" => Command::Select(parse_arg("select", arg)?),
            "selected" => Command::Selected,
            "export" => match arg.map(str::to_ascii_lowercase).as_deref() {
                Some("csv") => Command::Export(ExportFormat::Csv),
                Some("json") => Command::Export(ExportFormat::Json),
                _ => return Err(TableError::command("export needs 'csv' or 'json'")),
            },
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(TableError::command(format!("unknown command '{}'", other))),
        };
        Ok(command)
    }
}

/// What a command produced: text for stdout and whether the session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub output: String,
    pub quit: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            quit: false,
        }
    }
}

/// Top-level owner of the table state; runs one command at a time.
pub struct Shell<S: ArtworkSource> {
    reconciler: SelectionReconciler<S>,
}

impl<S: ArtworkSource> Shell<S> {
    pub fn new(reconciler: SelectionReconciler<S>) -> Self {
        Self { reconciler }
    }

    pub fn reconciler(&self) -> &SelectionReconciler<S> {
        &self.reconciler
    }

    fn render(&self) -> String {
        table::render_page(
            self.reconciler.records(),
            self.reconciler.selection(),
            &self.reconciler.window(),
        )
    }

    /// Page changes that fail keep the old page on screen with a note.
    fn after_navigation(&self, loaded: bool) -> Reply {
        if loaded {
            Reply::text(self.render())
        } else {
            Reply::text(format!(
                "Could not load the page, still showing the previous one.\n{}",
                self.render()
            ))
        }
    }

    pub async fn execute(&mut self, command: Command) -> Result<Reply> {
        tracing::debug!("Executing {:?}", command);

        let reply = match command {
            Command::Show => Reply::text(self.render()),
            Command::Next => {
                let loaded = self.reconciler.next_page().await;
                self.after_navigation(loaded)
            }
            Command::Prev => {
                let loaded = self.reconciler.prev_page().await;
                self.after_navigation(loaded)
            }
            Command::Page(n) => {
                let loaded = self.reconciler.go_to_page(n).await;
                self.after_navigation(loaded)
            }
            Command::Rows(n) => {
                crate::utils::validation::validate_range(
                    "rows",
                    n,
                    1,
                    crate::config::toml_config::MAX_PAGE_SIZE,
                )
                .map_err(|e| TableError::command(e.to_string()))?;
                let loaded = self.reconciler.set_page_size(n).await;
                self.after_navigation(loaded)
            }
            Command::Toggle(id) => {
                let selected = self.reconciler.toggle(id)?;
                let verb = if selected { "Selected" } else { "Deselected" };
                Reply::text(format!(
                    "{} {} ({} selected)",
                    verb,
                    id,
                    self.reconciler.selection().len()
                ))
            }
            Command::Check(checks) => {
                let ids: Vec<u64> = match checks {
                    PageChecks::All => self.reconciler.records().iter().map(|r| r.id).collect(),
                    PageChecks::None => Vec::new(),
                    PageChecks::Ids(ids) => ids,
                };
                self.reconciler.merge_page_selection(&ids);
                Reply::text(self.render())
            }
            Command::Select(n) => {
                let outcome = self.reconciler.bulk_select(n).await;
                Reply::text(format!(
                    "{} selected (+{} -{}, {} extra pages fetched)",
                    self.reconciler.selection().len(),
                    outcome.added,
                    outcome.removed,
                    outcome.pages_fetched
                ))
            }
            Command::Selected => Reply::text(table::render_selection(self.reconciler.selection())),
            Command::Export(ExportFormat::Csv) => {
                Reply::text(table::export_csv(self.reconciler.selection())?)
            }
            Command::Export(ExportFormat::Json) => {
                Reply::text(table::export_json(self.reconciler.selection())?)
            }
            Command::Help => Reply::text(HELP),
            Command::Quit => Reply {
                output: String::new(),
                quit: true,
            },
        };
        Ok(reply)
    }

    /// Reads commands line by line until `quit` or end of input.
    ///
    /// Command errors are printed and the loop continues; only I/O errors
    /// end the session early.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        output.write_all(self.render().as_bytes()).await?;
        output.write_all(b"\n> ").await?;
        output.flush().await?;

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                output.write_all(b"> ").await?;
                output.flush().await?;
                continue;
            }

            let result = match line.parse::<Command>() {
                Ok(command) => {
                    if command.fetches() {
                        output.write_all(b"Loading...\n").await?;
                        output.flush().await?;
                    }
                    self.execute(command).await
                }
                Err(e) => Err(e),
            };

            match result {
                Ok(reply) if reply.quit => break,
                Ok(reply) => {
                    output.write_all(reply.output.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                }
                Err(e) => {
                    tracing::debug!("Command failed: {}", e);
                    output
                        .write_all(format!("error: {}\n", e.user_friendly_message()).as_bytes())
                        .await?;
                }
            }
            output.write_all(b"> ").await?;
            output.flush().await?;
        }

        output.flush().await?;
        Ok(())
    }
}
