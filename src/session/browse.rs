//! Interactive directory + pedigree session.
//!
//! One cooperative loop: `tokio::select!` over stdin lines and an mpsc
//! channel of network completions. Fetches run as spawned tasks that post
//! their result back as an event; every state change goes through `Session`
//! transitions, so the staleness rules tested in `state` are the ones that
//! run here.

use crate::api::{ApiClient, ApiError};
use crate::model::{AncestryNode, Dog, DogDraft};
use crate::render;
use crate::session::{PedigreeRequest, PedigreeState, Session};

use anyhow::Context;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

enum Event {
    Listing(Result<Vec<Dog>, ApiError>),
    Pedigree {
        dog_id: u64,
        result: Result<AncestryNode, ApiError>,
    },
    Created(Result<Dog, ApiError>),
}

pub async fn run(client: ApiClient) -> anyhow::Result<()> {
    let mut session = Session::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    // Initial listing, as on mount.
    spawn_listing(&client, String::new(), &tx);

    println!("Pedigree organizer. Type `help` for commands.");
    prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("read stdin")? else {
                    break;
                };
                if !handle_command(line.trim(), &mut session, &client, &tx) {
                    break;
                }
                prompt();
            }
            Some(event) = rx.recv() => {
                handle_event(event, &mut session, &client, &tx);
                prompt();
            }
        }
    }

    Ok(())
}

/// Dispatch one input line. Returns false when the session should end.
fn handle_command(
    line: &str,
    session: &mut Session,
    client: &ApiClient,
    tx: &mpsc::UnboundedSender<Event>,
) -> bool {
    let (cmd, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));
    let rest = rest.trim();

    match cmd {
        "" => {}
        "help" => print_help(),
        "quit" | "exit" => return false,
        "list" => print_listing(session.listing()),
        "search" => {
            session.set_query(rest);
            spawn_listing(client, rest.to_string(), tx);
        }
        "select" => match rest.parse::<u64>() {
            Ok(id) => match session.listing().iter().find(|d| d.id == id).cloned() {
                Some(dog) => {
                    println!("Loading pedigree for {}...", dog.name);
                    let req = session.select(dog);
                    spawn_pedigree(client, req, tx);
                }
                None => println!("No dog with id {} in the current listing.", id),
            },
            Err(_) => println!("Usage: select <id>"),
        },
        "clear" => {
            session.clear_selection();
            println!("Selection cleared.");
        }
        "retry" => match session.retry() {
            Some(req) => {
                println!("Retrying...");
                spawn_pedigree(client, req, tx);
            }
            None => println!("Nothing to retry."),
        },
        "add" => match parse_draft(rest) {
            Ok(draft) => spawn_create(client, draft, tx),
            Err(err) => println!("{}", err),
        },
        "show" => print_selection(session),
        other => println!("Unknown command {:?}; type `help`.", other),
    }

    true
}

fn handle_event(
    event: Event,
    session: &mut Session,
    client: &ApiClient,
    tx: &mpsc::UnboundedSender<Event>,
) {
    match event {
        Event::Listing(Ok(dogs)) => {
            session.set_listing(dogs);
            print_listing(session.listing());
        }
        Event::Listing(Err(err)) => println!("Listing fetch failed: {}", err),

        Event::Pedigree { dog_id, result } => match result {
            Ok(fetched) => {
                if session.pedigree_loaded(dog_id, fetched) {
                    if let PedigreeState::Ready { tree, .. } = session.pedigree() {
                        let boxes = render::layout(Some(tree), render::PEDIGREE_DEPTH);
                        print!("{}", render::render_text(boxes.as_ref()));
                    }
                } else {
                    debug!(dog_id, "discarded pedigree for superseded selection");
                }
            }
            Err(err) => {
                if session.pedigree_failed(dog_id, err.to_string()) {
                    println!("Pedigree fetch failed: {} (type `retry` to try again)", err);
                } else {
                    debug!(dog_id, "discarded failure for superseded selection");
                }
            }
        },

        Event::Created(Ok(dog)) => {
            println!("Created {} (id {})", dog.name, dog.id);
            // The new record should show up in the directory.
            spawn_listing(client, session.query().to_string(), tx);
        }
        Event::Created(Err(ApiError::Rejected(detail))) => {
            println!("Create rejected: {}", detail)
        }
        Event::Created(Err(err)) => println!("Create failed: {}", err),
    }
}

fn spawn_listing(client: &ApiClient, query: String, tx: &mpsc::UnboundedSender<Event>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.list_dogs(&query).await;
        let _ = tx.send(Event::Listing(result));
    });
}

fn spawn_pedigree(client: &ApiClient, req: PedigreeRequest, tx: &mpsc::UnboundedSender<Event>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.pedigree(req.dog_id, req.depth).await;
        let _ = tx.send(Event::Pedigree {
            dog_id: req.dog_id,
            result,
        });
    });
}

fn spawn_create(client: &ApiClient, draft: DogDraft, tx: &mpsc::UnboundedSender<Event>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.create_dog(&draft).await;
        let _ = tx.send(Event::Created(result));
    });
}

/// Parse `add` fields: either a bare name or comma-separated `key=value`
/// pairs, e.g. `add name=Rex Junior, sex=male, born=2020-05-01`.
fn parse_draft(input: &str) -> anyhow::Result<DogDraft> {
    use anyhow::bail;

    let mut draft = DogDraft::default();
    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.split_once('=') {
            None if draft.name.is_empty() => draft.name = part.to_string(),
            None => bail!("unrecognized field {:?} (expected key=value)", part),
            Some((key, value)) => {
                let value = value.trim();
                match key.trim() {
                    "name" => draft.name = value.to_string(),
                    "sex" => draft.sex = value.parse().map_err(anyhow::Error::msg)?,
                    "born" | "birth_date" => {
                        draft.birth_date =
                            Some(value.parse().context("birth date must be YYYY-MM-DD")?)
                    }
                    "color" => draft.color = Some(value.to_string()),
                    "notes" => draft.notes = Some(value.to_string()),
                    other => bail!("unknown field {:?}", other),
                }
            }
        }
    }

    draft.validate()?;
    Ok(draft)
}

fn print_listing(dogs: &[Dog]) {
    if dogs.is_empty() {
        println!("(no dogs)");
        return;
    }
    for dog in dogs {
        println!("{:>5}  {}  ({})", dog.id, dog.name, dog.summary());
    }
}

fn print_selection(session: &Session) {
    let Some(dog) = session.selected() else {
        println!("No selection.");
        return;
    };
    println!("{} ({})", dog.name, dog.summary());

    match session.pedigree() {
        PedigreeState::Idle => {}
        PedigreeState::Loading { .. } => println!("Pedigree loading..."),
        PedigreeState::Ready { tree, .. } => {
            let boxes = render::layout(Some(tree), render::PEDIGREE_DEPTH);
            print!("{}", render::render_text(boxes.as_ref()));
        }
        PedigreeState::Failed { error, .. } => {
            println!("Pedigree fetch failed: {} (type `retry`)", error)
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  search [text]   refresh the directory (empty text lists everything)");
    println!("  list            reprint the current directory");
    println!("  select <id>     load the pedigree for a dog");
    println!("  show            reprint the current selection");
    println!("  clear           drop the selection");
    println!("  retry           re-run a failed pedigree fetch");
    println!("  add <fields>    create a record, e.g. add name=Rex, sex=male, born=2020-05-01");
    println!("  quit            leave");
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sex;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_name_is_enough() {
        let draft = parse_draft("Rex").unwrap();
        assert_eq!(draft.name, "Rex");
        assert_eq!(draft.sex, Sex::Unknown);
    }

    #[test]
    fn full_field_list_parses() {
        let draft =
            parse_draft("name=Rex Junior, sex=male, color=black, born=2020-05-01, notes=good boy")
                .unwrap();
        assert_eq!(draft.name, "Rex Junior");
        assert_eq!(draft.sex, Sex::Male);
        assert_eq!(draft.color.as_deref(), Some("black"));
        assert_eq!(
            draft.birth_date,
            Some(NaiveDate::from_ymd_opt(2020, 5, 1).unwrap())
        );
        assert_eq!(draft.notes.as_deref(), Some("good boy"));
    }

    #[test]
    fn missing_name_is_rejected_before_any_request() {
        assert!(parse_draft("").is_err());
        assert!(parse_draft("sex=male").is_err());
    }

    #[test]
    fn bad_fields_are_rejected() {
        assert!(parse_draft("name=Rex, sex=robot").is_err());
        assert!(parse_draft("name=Rex, born=yesterday").is_err());
        assert!(parse_draft("name=Rex, breed=collie").is_err());
    }
}
