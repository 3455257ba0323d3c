//! `sme schedules`: manage recurring comparison reports.
//!
//! The backend owns execution; these handlers only create, edit and trigger
//! schedules.

use chrono::{Local, NaiveDateTime};
use clap::Subcommand;
use sme_client::BackendClient;
use sme_core::{AppConfig, ComparisonSchedule, ScheduleFrequency, ScheduleRequest};

use crate::context::backend_client;

/// Sub-commands available under `schedules`.
#[derive(Debug, Subcommand)]
pub enum ScheduleCommands {
    /// List schedules
    List {
        /// Only show active schedules
        #[arg(long)]
        active: bool,
    },
    /// Show one schedule
    Show { id: i64 },
    /// Create a schedule
    Create {
        #[arg(long)]
        name: String,
        /// Recipient e-mail address
        #[arg(long)]
        email: String,
        /// daily, weekly or monthly
        #[arg(long, default_value = "weekly")]
        frequency: ScheduleFrequency,
        /// Report template identifier
        #[arg(long)]
        template: Option<String>,
        /// Data source configuration (JSON)
        #[arg(long)]
        data_source: Option<String>,
        /// Create the schedule paused
        #[arg(long)]
        paused: bool,
    },
    /// Change a schedule; omitted fields keep their current value
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        frequency: Option<ScheduleFrequency>,
        #[arg(long)]
        template: Option<String>,
    },
    /// Delete a schedule
    Delete { id: i64 },
    /// Pause or resume a schedule
    Toggle { id: i64 },
    /// Run a schedule now
    Execute { id: i64 },
}

/// # Errors
///
/// Returns an error if the backend call fails or the schedule does not exist.
pub(crate) async fn run_schedules(
    config: &AppConfig,
    command: ScheduleCommands,
) -> anyhow::Result<()> {
    let client = backend_client(config)?;
    match command {
        ScheduleCommands::List { active } => {
            let schedules = client.list_schedules(active).await?;
            if schedules.is_empty() {
                println!("no schedules found");
                return Ok(());
            }
            print_schedule_table(&schedules);
        }
        ScheduleCommands::Show { id } => {
            let schedule = fetch(&client, id).await?;
            print_schedule_detail(&schedule);
        }
        ScheduleCommands::Create {
            name,
            email,
            frequency,
            template,
            data_source,
            paused,
        } => {
            let mut request = ScheduleRequest::new(&name, &email, frequency);
            request.report_template = template;
            request.data_source_config = data_source;
            request.active = !paused;
            let schedule = client.create_schedule(&request).await?;
            println!("created schedule {}", schedule.id);
            print_schedule_detail(&schedule);
        }
        ScheduleCommands::Update {
            id,
            name,
            email,
            frequency,
            template,
        } => {
            let current = fetch(&client, id).await?;
            let mut request = ScheduleRequest::from(&current);
            if let Some(name) = name {
                request.name = name;
            }
            if let Some(email) = email {
                request.recipient_email = email;
            }
            if let Some(frequency) = frequency {
                request.frequency = frequency;
            }
            if template.is_some() {
                request.report_template = template;
            }
            let schedule = client.update_schedule(id, &request).await?;
            println!("updated schedule {id}");
            print_schedule_detail(&schedule);
        }
        ScheduleCommands::Delete { id } => {
            let ack = client.delete_schedule(id).await?;
            println!("{}", ack.message.unwrap_or_else(|| format!("deleted schedule {id}")));
        }
        ScheduleCommands::Toggle { id } => {
            let schedule = client.toggle_schedule(id).await?;
            let state = if schedule.active { "active" } else { "paused" };
            println!("schedule {id} is now {state}");
        }
        ScheduleCommands::Execute { id } => {
            let ack = client.execute_schedule(id).await?;
            println!("{}", ack.message.unwrap_or_else(|| format!("executed schedule {id}")));
        }
    }
    Ok(())
}

async fn fetch(client: &BackendClient, id: i64) -> anyhow::Result<ComparisonSchedule> {
    client
        .get_schedule(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("schedule {id} not found"))
}

fn fmt_time(time: Option<NaiveDateTime>) -> String {
    time.map_or_else(
        || "\u{2014}".to_string(),
        |t| t.format("%Y-%m-%d %H:%M").to_string(),
    )
}

fn print_schedule_table(schedules: &[ComparisonSchedule]) {
    println!(
        "{:<6}{:<24}{:<10}{:<8}{:<18}RECIPIENT",
        "ID", "NAME", "FREQ", "ACTIVE", "NEXT RUN"
    );
    for s in schedules {
        println!(
            "{:<6}{:<24}{:<10}{:<8}{:<18}{}",
            s.id,
            s.name,
            s.frequency.to_string(),
            if s.active { "yes" } else { "no" },
            fmt_time(s.next_run_at),
            s.recipient_email
        );
    }
}

fn print_schedule_detail(s: &ComparisonSchedule) {
    println!("{} (id {})", s.name, s.id);
    println!("  recipient  {}", s.recipient_email);
    println!("  frequency  {}", s.frequency);
    println!("  active     {}", if s.active { "yes" } else { "no" });
    println!("  last run   {}", fmt_time(s.last_run_at));
    println!("  next run   {}", fmt_time(next_run(s, Local::now().naive_local())));
}

/// The backend's next run, or the one its cadence implies from `now`.
/// Backend times are local wall-clock, so `now` must be too.
fn next_run(s: &ComparisonSchedule, now: NaiveDateTime) -> Option<NaiveDateTime> {
    if !s.active {
        return None;
    }
    Some(
        s.next_run_at
            .unwrap_or_else(|| s.frequency.next_run_after(now)),
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn schedule(active: bool, next_run_at: Option<NaiveDateTime>) -> ComparisonSchedule {
        ComparisonSchedule {
            id: 1,
            name: "Daily sales".to_string(),
            recipient_email: "owner@example.com".to_string(),
            frequency: ScheduleFrequency::Daily,
            active,
            created_at: at(2025, 1, 1, 8, 0),
            last_run_at: None,
            next_run_at,
            data_source_config: None,
            report_template: None,
        }
    }

    #[test]
    fn next_run_prefers_backend_value() {
        let stored = at(2025, 3, 4, 9, 0);
        assert_eq!(next_run(&schedule(true, Some(stored)), at(2025, 3, 1, 12, 0)), Some(stored));
    }

    #[test]
    fn next_run_follows_the_given_local_date() {
        let now = at(2025, 3, 3, 23, 30);
        assert_eq!(next_run(&schedule(true, None), now), Some(at(2025, 3, 4, 9, 0)));
    }

    #[test]
    fn paused_schedule_has_no_next_run() {
        assert_eq!(next_run(&schedule(false, Some(at(2025, 3, 4, 9, 0))), at(2025, 3, 1, 0, 0)), None);
    }
}
