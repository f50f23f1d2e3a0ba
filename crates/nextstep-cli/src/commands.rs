//! Subcommand handlers
//!
//! Each handler renders plain text to the given writer so it can be
//! exercised without a terminal.

use anyhow::{anyhow, bail};
use clap::ArgMatches;
use nextstep_catalog::{Event, EventCategory};
use nextstep_store::Storage;
use nextstep_tracker::{
    BadgeFilter, NoOp, Notifier, ToastBoard, Tracker, Transition, TOAST_TITLE,
};
use std::io::Write;
use std::time::Instant;

/// Parsed subcommand
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Badges(BadgeFilter),
    Events(Option<EventCategory>),
    Event(String),
    Complete(String),
    Uncomplete(String),
    Stats,
    Activity,
    Reset,
}

impl Action {
    pub(crate) fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        let id = |args: &ArgMatches| {
            args.get_one::<String>("id")
                .cloned()
                .ok_or_else(|| anyhow!("missing event id"))
        };

        let action = match matches.subcommand() {
            Some(("badges", args)) => Self::Badges(
                args.get_one::<BadgeFilter>("filter")
                    .copied()
                    .unwrap_or_default(),
            ),
            Some(("events", args)) => {
                Self::Events(args.get_one::<EventCategory>("category").copied())
            }
            Some(("event", args)) => Self::Event(id(args)?),
            Some(("complete", args)) => Self::Complete(id(args)?),
            Some(("uncomplete", args)) => Self::Uncomplete(id(args)?),
            Some(("stats", _)) => Self::Stats,
            Some(("activity", _)) => Self::Activity,
            Some(("reset", _)) => Self::Reset,
            Some((other, _)) => bail!("unknown command: {other}"),
            None => bail!("no command given"),
        };
        Ok(action)
    }
}

pub(crate) fn run<S, N, W>(
    tracker: &Tracker<'_, S, N>,
    board: &ToastBoard,
    action: Action,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: Storage,
    N: Notifier,
    W: Write,
{
    match action {
        Action::Badges(filter) => badges(tracker, filter, out),
        Action::Events(category) => events(tracker, category, out),
        Action::Event(id) => event(tracker, &id, out),
        Action::Complete(id) => {
            let transition = tracker.complete(&id)?;
            report_transition(tracker, &id, &transition, out)?;
            toasts(board, out)
        }
        Action::Uncomplete(id) => {
            let transition = tracker.uncomplete(&id)?;
            report_transition(tracker, &id, &transition, out)
        }
        Action::Stats => stats(tracker, out),
        Action::Activity => activity(tracker, out),
        Action::Reset => {
            tracker.reset()?;
            writeln!(out, "All progress cleared.")?;
            Ok(())
        }
    }
}

fn badges<S: Storage, N: Notifier, W: Write>(
    tracker: &Tracker<'_, S, N>,
    filter: BadgeFilter,
    out: &mut W,
) -> anyhow::Result<()> {
    let summary = tracker.summary();
    writeln!(
        out,
        "Badges: {} of {} earned ({}%)",
        summary.earned_count, summary.total_count, summary.completion_percent
    )?;
    for view in tracker.badge_views(filter) {
        let mark = if view.earned { "x" } else { " " };
        writeln!(
            out,
            "[{mark}] {:>3} {:<22} {:<13} {:>9} {:>4}%",
            view.badge.id,
            view.badge.name,
            view.badge.category,
            view.progress_label(),
            view.percent
        )?;
    }
    Ok(())
}

fn events<S: Storage, N: Notifier, W: Write>(
    tracker: &Tracker<'_, S, N>,
    category: Option<EventCategory>,
    out: &mut W,
) -> anyhow::Result<()> {
    let completed = tracker.completed();
    for event in tracker.catalog().events_in(category) {
        let done = if completed.contains(&event.id) { "done" } else { "" };
        writeln!(
            out,
            "{:<10} {:<16} {:<32} {:<13} {:>3}% full {done}",
            event.id,
            event.info.date,
            event.info.title,
            event.category,
            event.capacity_percent()
        )?;
    }
    Ok(())
}

fn event<S: Storage, N: Notifier, W: Write>(
    tracker: &Tracker<'_, S, N>,
    id: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    let Some(event) = tracker.catalog().event(id) else {
        bail!("unknown event: {id}");
    };
    let info = &event.info;
    writeln!(out, "{} ({})", info.title, event.category)?;
    writeln!(out, "When:      {} {}", info.date, info.time)?;
    writeln!(out, "Where:     {}, {}", info.location, info.address)?;
    writeln!(out, "Organizer: {} <{}> {}", info.organizer, info.contact, info.phone)?;
    writeln!(
        out,
        "Capacity:  {}/{} registered, {} spots left",
        info.registered,
        info.capacity,
        event.spots_left()
    )?;
    if !info.tags.is_empty() {
        writeln!(out, "Tags:      {}", info.tags.join(", "))?;
    }
    if !info.full_description.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", info.full_description)?;
    }
    write_contributions(event, out)?;
    let status = if tracker.is_completed(id) { "completed" } else { "not completed" };
    writeln!(out, "Status:    {status}")?;
    Ok(())
}

fn write_contributions<W: Write>(event: &Event, out: &mut W) -> anyhow::Result<()> {
    let mut touched = event.touched_keys().peekable();
    if touched.peek().is_none() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "Completing this event counts toward:")?;
    for key in touched {
        if let Some(contribution) = event.badge_progress.get(&key) {
            writeln!(out, "  {key} +{}", contribution.amount())?;
        }
    }
    Ok(())
}

fn report_transition<S: Storage, N: Notifier, W: Write>(
    tracker: &Tracker<'_, S, N>,
    id: &str,
    transition: &Transition,
    out: &mut W,
) -> anyhow::Result<()> {
    let title = tracker
        .catalog()
        .event(id)
        .map_or(id, |event| event.info.title.as_str());
    match transition {
        Transition::Completed { .. } => writeln!(out, "Completed: {title}")?,
        Transition::Uncompleted => writeln!(out, "Marked not completed: {title}")?,
        Transition::Unchanged(NoOp::AlreadyCompleted) => {
            writeln!(out, "Already completed: {title}")?;
        }
        Transition::Unchanged(NoOp::NotCompleted) => writeln!(out, "Not completed yet: {title}")?,
        Transition::Unchanged(NoOp::UnknownEvent) => writeln!(out, "No such event: {id}")?,
    }
    Ok(())
}

fn toasts<W: Write>(board: &ToastBoard, out: &mut W) -> anyhow::Result<()> {
    for toast in board.active(Instant::now()) {
        writeln!(out, "{TOAST_TITLE} {}", toast.message())?;
    }
    Ok(())
}

fn stats<S: Storage, N: Notifier, W: Write>(
    tracker: &Tracker<'_, S, N>,
    out: &mut W,
) -> anyhow::Result<()> {
    let stats = tracker.profile();
    writeln!(out, "Events attended:  {}", stats.events_attended)?;
    writeln!(out, "Badges earned:    {}", stats.badges_earned)?;
    writeln!(out, "Volunteer hours:  {}", stats.volunteered_hours)?;
    writeln!(out, "Completion:       {}%", stats.completion_percent)?;
    writeln!(out, "Badges remaining: {}", stats.badges_remaining)?;
    Ok(())
}

fn activity<S: Storage, N: Notifier, W: Write>(
    tracker: &Tracker<'_, S, N>,
    out: &mut W,
) -> anyhow::Result<()> {
    let feed = tracker.recent_activity();
    if feed.is_empty() {
        writeln!(out, "No completed events yet.")?;
        return Ok(());
    }
    for entry in feed {
        writeln!(
            out,
            "{:<16} {:<32} {}",
            entry.event.info.date, entry.event.info.title, entry.kind
        )?;
    }
    Ok(())
}
