//! The console command language

use thiserror::Error;
use upset_data::{AggregateBy, SortBy};
use upset_views::{ConfigChange, ElementEvent, FilterBoxEvent, Session, UpsetEvent};

use crate::console::describe_row;

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("unknown command '{0}', try 'help'")]
    UnknownCommand(String),

    #[error("'{command}' expects {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },
}

/// Which aggregation level an option applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    First,
    Second,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Datasets,
    Load(String),
    Rows,
    Select(usize),
    Deselect(usize),
    Selections,
    RemoveSet(String),
    FilterSet(usize),
    Sort(SortBy),
    Aggregate(Level, AggregateBy),
    Overlap(Level, usize),
    MinDegree(usize),
    MaxDegree(Option<usize>),
    HideEmpty(bool),
    Undo,
    Redo,
    History,
    Quit,
}

pub const HELP: &str = "\
commands:
  datasets                         list offered datasets
  load <name>                      switch dataset
  rows                             list render rows
  select <row> | deselect <index>  add or remove an element selection
  selections                       list selections
  remove-set <name>                remove a set from the matrix
  filter-set <column>              show subsets of one set only
  sort cardinality|degree|deviation|set <column>
  agg first|second none|degree|sets|deviation|overlaps
  overlap first|second <n>
  min-degree <n> | max-degree <n>|none
  hide-empty on|off
  undo | redo | history | quit";

fn number(word: Option<&str>, command: &'static str) -> Result<usize, ParseError> {
    word.and_then(|w| w.parse().ok()).ok_or(ParseError::BadArgument {
        command,
        expected: "a number",
    })
}

fn level(word: Option<&str>, command: &'static str) -> Result<Level, ParseError> {
    match word {
        Some("first") => Ok(Level::First),
        Some("second") => Ok(Level::Second),
        _ => Err(ParseError::BadArgument {
            command,
            expected: "'first' or 'second'",
        }),
    }
}

/// Parse one input line; blank lines yield `None`
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();
    let arg = rest.first().copied();

    let command = match head {
        "help" | "?" => Command::Help,
        "datasets" => Command::Datasets,
        "load" if !rest.is_empty() => Command::Load(rest.join(" ")),
        "load" => {
            return Err(ParseError::BadArgument {
                command: "load",
                expected: "a dataset name",
            })
        }
        "rows" => Command::Rows,
        "select" => Command::Select(number(arg, "select")?),
        "deselect" => Command::Deselect(number(arg, "deselect")?),
        "selections" => Command::Selections,
        "remove-set" if !rest.is_empty() => Command::RemoveSet(rest.join(" ")),
        "remove-set" => {
            return Err(ParseError::BadArgument {
                command: "remove-set",
                expected: "a set name",
            })
        }
        "filter-set" => Command::FilterSet(number(arg, "filter-set")?),
        "sort" => Command::Sort(match arg {
            Some("cardinality") => SortBy::Cardinality,
            Some("degree") => SortBy::Degree,
            Some("deviation") => SortBy::Deviation,
            Some("set") => SortBy::Set(number(rest.get(1).copied(), "sort set")?),
            _ => {
                return Err(ParseError::BadArgument {
                    command: "sort",
                    expected: "cardinality, degree, deviation or set <column>",
                })
            }
        }),
        "agg" => {
            let level = level(arg, "agg")?;
            let by = match rest.get(1).copied() {
                Some("none") => AggregateBy::None,
                Some("degree") => AggregateBy::Degree,
                Some("sets") => AggregateBy::Sets,
                Some("deviation") => AggregateBy::DeviationBins,
                Some("overlaps") => AggregateBy::Overlaps,
                _ => {
                    return Err(ParseError::BadArgument {
                        command: "agg",
                        expected: "none, degree, sets, deviation or overlaps",
                    })
                }
            };
            Command::Aggregate(level, by)
        }
        "overlap" => Command::Overlap(level(arg, "overlap")?, number(rest.get(1).copied(), "overlap")?),
        "min-degree" => Command::MinDegree(number(arg, "min-degree")?),
        "max-degree" if arg == Some("none") => Command::MaxDegree(None),
        "max-degree" => Command::MaxDegree(Some(number(arg, "max-degree")?)),
        "hide-empty" => Command::HideEmpty(match arg {
            Some("on") | Some("true") => true,
            Some("off") | Some("false") => false,
            _ => {
                return Err(ParseError::BadArgument {
                    command: "hide-empty",
                    expected: "'on' or 'off'",
                })
            }
        }),
        "undo" => Command::Undo,
        "redo" => Command::Redo,
        "history" => Command::History,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run a command against the session
pub fn execute(session: &Session, command: Command) -> anyhow::Result<Flow> {
    match command {
        Command::Help => println!("{}", HELP),
        Command::Datasets => {
            let current = session.dataset_info.current().map(|d| d.name);
            for info in session.navbar.datasets() {
                let marker = if current.as_deref() == Some(info.name.as_str()) { '*' } else { ' ' };
                println!("{} {:<12} {:>2} sets  {}", marker, info.name, info.set_count, info.description);
            }
        }
        Command::Load(name) => match session.navbar.find(&name) {
            Some(info) => session.change_dataset(info)?,
            None => anyhow::bail!("no dataset named '{}'", name),
        },
        Command::Rows => {
            let data = session.upset.data().ok_or_else(|| anyhow::anyhow!("no dataset loaded"))?;
            println!("      {}", data.set_names().join(" | "));
            for (position, row) in data.render_rows.iter().enumerate() {
                println!("{}", describe_row(position, row));
            }
        }
        Command::Select(position) => {
            let data = session.upset.data().ok_or_else(|| anyhow::anyhow!("no dataset loaded"))?;
            let row = data
                .render_rows
                .get(position)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no row {} (rows: {})", position, data.render_rows.len()))?;
            session.upset.comm().emit(UpsetEvent::SelectRowTrigger(row))?;
        }
        Command::Deselect(index) => session.elements.comm().emit(ElementEvent::RemoveSelectionTrigger(index))?,
        Command::Selections => {
            for (index, selection) in session.elements.selections().iter().enumerate() {
                println!("#{} {}", index, selection.row.data.element_name());
                for element in &selection.elements {
                    println!("    {}", serde_json::to_string(element)?);
                }
            }
        }
        Command::RemoveSet(name) => {
            let data = session.upset.data().ok_or_else(|| anyhow::anyhow!("no dataset loaded"))?;
            let set = data
                .sets
                .iter()
                .find(|s| s.name == name)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no set named '{}' in the matrix", name))?;
            session.upset.comm().emit(UpsetEvent::RemoveSetTrigger(set))?;
        }
        Command::FilterSet(column) => session.upset.comm().emit(UpsetEvent::SetFilter(column))?,
        Command::Sort(sort) => match sort {
            SortBy::Cardinality => session.upset.comm().emit(UpsetEvent::SortByCardinalityTrigger)?,
            SortBy::Deviation => session.upset.comm().emit(UpsetEvent::SortByDeviationTrigger)?,
            SortBy::Set(column) => session.upset.comm().emit(UpsetEvent::SortBySetTrigger(column))?,
            SortBy::Degree => change(session, ConfigChange::SortBy(SortBy::Degree))?,
        },
        Command::Aggregate(Level::First, by) => change(session, ConfigChange::FirstAggregation(by))?,
        Command::Aggregate(Level::Second, by) => change(session, ConfigChange::SecondAggregation(by))?,
        Command::Overlap(Level::First, n) => change(session, ConfigChange::FirstOverlap(n))?,
        Command::Overlap(Level::Second, n) => change(session, ConfigChange::SecondOverlap(n))?,
        Command::MinDegree(n) => change(session, ConfigChange::MinDegree(n))?,
        Command::MaxDegree(bound) => change(session, ConfigChange::MaxDegree(bound))?,
        Command::HideEmpty(flag) => change(session, ConfigChange::HideEmpty(flag))?,
        Command::Undo => {
            if session.app.undo()?.is_none() {
                println!("nothing to undo");
            }
        }
        Command::Redo => {
            if session.app.redo()?.is_none() {
                println!("nothing to redo");
            }
        }
        Command::History => {
            let graph = session.app.graph();
            for (index, record) in graph.records().iter().enumerate() {
                let marker = if index + 1 == graph.cursor() { '>' } else { ' ' };
                println!(
                    "{} {:>3} {:<24} {} {}",
                    marker,
                    record.order(),
                    record.action(),
                    record.recorded_at().format("%H:%M:%S"),
                    record.id()
                );
            }
        }
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn change(session: &Session, change: ConfigChange) -> anyhow::Result<()> {
    session.filter_box.comm().emit(FilterBoxEvent::Change(change))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use upset_data::{RenderConfigStore, SessionStorage};
    use upset_views::SessionViews;

    fn session() -> Session {
        let (provider, infos) = crate::demo::provider();
        let session = Session::new(
            Arc::new(provider),
            RenderConfigStore::new(SessionStorage::new()),
            SessionViews::default(),
        );
        session.navbar.set_datasets(infos).unwrap();
        execute(&session, Command::Load("Movies".into())).unwrap();
        session
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse("  ").unwrap(), None);
        assert_eq!(parse("sort set 2").unwrap(), Some(Command::Sort(SortBy::Set(2))));
        assert_eq!(
            parse("agg second overlaps").unwrap(),
            Some(Command::Aggregate(Level::Second, AggregateBy::Overlaps))
        );
        assert_eq!(parse("max-degree none").unwrap(), Some(Command::MaxDegree(None)));
        assert_eq!(parse("remove-set Film Noir").unwrap(), Some(Command::RemoveSet("Film Noir".into())));
        assert_eq!(parse("hide-empty on").unwrap(), Some(Command::HideEmpty(true)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse("frobnicate"), Err(ParseError::UnknownCommand("frobnicate".into())));
        assert!(matches!(parse("select x"), Err(ParseError::BadArgument { command: "select", .. })));
        assert!(matches!(parse("agg third degree"), Err(ParseError::BadArgument { command: "agg", .. })));
        assert!(matches!(parse("load"), Err(ParseError::BadArgument { command: "load", .. })));
    }

    #[test]
    fn test_commands_drive_history() {
        let session = session();
        assert!(session.upset.data().is_some());

        execute(&session, Command::Aggregate(Level::First, AggregateBy::None)).unwrap();
        execute(&session, Command::Select(0)).unwrap();
        execute(&session, Command::RemoveSet("Thriller".into())).unwrap();
        execute(&session, Command::Sort(SortBy::Degree)).unwrap();
        assert_eq!(session.app.graph().len(), 4);
        assert_eq!(session.elements.selection_count(), 1);
        assert_eq!(session.data_model.data().map(|d| d.sets.len()), Some(4));

        for _ in 0..4 {
            execute(&session, Command::Undo).unwrap();
        }
        assert_eq!(session.data_model.data().map(|d| d.sets.len()), Some(5));
        assert_eq!(session.elements.selection_count(), 0);
        assert_eq!(execute(&session, Command::Undo).unwrap(), Flow::Continue);
        assert_eq!(execute(&session, Command::Quit).unwrap(), Flow::Quit);
    }

    #[test]
    fn test_unknown_names_fail() {
        let session = session();
        assert!(execute(&session, Command::Load("Nope".into())).is_err());
        assert!(execute(&session, Command::RemoveSet("Western".into())).is_err());
        assert!(execute(&session, Command::Select(999)).is_err());
        assert!(session.app.graph().is_empty());
    }
}
