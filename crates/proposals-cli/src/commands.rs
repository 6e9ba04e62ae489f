//! Command execution and output formatting.

use anyhow::{bail, Result};
use futures::future::join_all;
use serde::Serialize;

use proposals_core::auth::LoginGate;
use proposals_core::models::{Activity, Proposal};
use proposals_core::{ProposalStore, Route};

use crate::Command;

/// Everything a command needs, shared across REPL lines.
pub struct Context {
    pub store: ProposalStore,
    pub gate: LoginGate,
    pub strict: bool,
    pub json: bool,
}

impl Context {
    fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", human());
        }
        Ok(())
    }
}

fn format_proposal(proposal: &Proposal) -> String {
    let mut out = proposal.to_string();
    for activity in &proposal.activities {
        out.push_str(&format!("\n  {}", activity));
    }
    out
}

fn format_list(proposals: &[Proposal]) -> String {
    if proposals.is_empty() {
        return "No proposals".to_string();
    }
    proposals
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_activity(activity: Option<&Activity>) -> String {
    activity
        .map(|a| a.to_string())
        .unwrap_or_else(|| "No activity".to_string())
}

pub async fn run(ctx: &Context, command: Command) -> Result<()> {
    let store = &ctx.store;

    match command {
        Command::List => {
            let proposals = if ctx.strict {
                store.list_proposals().await?
            } else {
                store.lenient().list_proposals().await
            };
            ctx.emit(&proposals, || format_list(&proposals))
        }

        Command::Show { ids } => {
            let results = join_all(ids.iter().map(|id| store.get_proposal(id))).await;
            for (id, result) in ids.iter().zip(results) {
                let proposal = match result {
                    Ok(proposal) => Some(proposal),
                    Err(e) if ctx.strict => bail!("Could not load proposal {}: {}", id, e),
                    Err(_) => None,
                };
                ctx.emit(&proposal, || match proposal {
                    Some(ref p) => format_proposal(p),
                    None => format!("No proposal {}", id),
                })?;
            }
            Ok(())
        }

        Command::Add { name, activities } => {
            let activities = activities.into_iter().map(Activity::new).collect();
            let created = if ctx.strict {
                Some(store.add_proposal(&name, activities).await?)
            } else {
                store.lenient().add_proposal(&name, activities).await
            };
            ctx.emit(&created, || match created {
                Some(ref p) => format!("Added {}", p),
                None => "Proposal not added".to_string(),
            })
        }

        Command::Delete { id } => {
            let deleted = if ctx.strict {
                store.delete_proposal(&id).await?;
                true
            } else {
                store.lenient().delete_proposal(&id).await
            };
            ctx.emit(&deleted, || {
                if deleted {
                    format!("Deleted {}", id)
                } else {
                    format!("Could not delete {}", id)
                }
            })
        }

        Command::Activity {
            proposal_id,
            activity_id,
        } => {
            let activity = if ctx.strict {
                Some(store.get_activity(&proposal_id, activity_id).await?)
            } else {
                store.lenient().get_activity(&proposal_id, activity_id).await
            };
            ctx.emit(&activity, || format_activity(activity.as_ref()))
        }

        Command::AddActivity {
            proposal_id,
            activity_id,
        } => {
            let activity = if ctx.strict {
                Some(store.add_activity(&proposal_id, activity_id).await?)
            } else {
                store.lenient().add_activity(&proposal_id, activity_id).await
            };
            ctx.emit(&activity, || match activity {
                Some(ref a) => format!("Added {} to {}", a, proposal_id),
                None => "Activity not added".to_string(),
            })
        }

        Command::Login { username } => {
            let username = match username {
                Some(username) => username,
                None => prompt("Username: ")?,
            };
            let password = rpassword::prompt_password("Password: ")?;
            match ctx.gate.check(&username, &password) {
                Some(route) => {
                    println!("Logged in, continue at {}", route);
                    Ok(())
                }
                None => bail!("Invalid username or password"),
            }
        }

        Command::Route { path } => match Route::resolve(&path) {
            Some(route) => {
                println!("{}", route);
                Ok(())
            }
            None => bail!("No route for {}", path),
        },

        Command::Repl => bail!("Already in a REPL"),
    }
}

fn prompt(label: &str) -> Result<String> {
    use std::io::Write;

    print!("{}", label);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
