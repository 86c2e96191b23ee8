//! `backarc run` – expand templates and drive the submission scheduler.

use anyhow::Result;
use std::sync::Arc;

use backarc_core::config::BackarcConfig;
use backarc_core::probe::Outcome;
use backarc_core::scheduler::{event_channel, EventReceiver, RunEvent, RunOptions, Scheduler};
use backarc_core::surface::HttpNavigator;
use backarc_core::task::{build_tasks, validate_run};
use backarc_core::video::VideoId;

use super::load_templates;

pub async fn run_submit(cfg: &BackarcConfig, input: &str, template_source: &str) -> Result<()> {
    let id = VideoId::parse(input)?;
    let templates = load_templates(template_source).await?;
    validate_run(cfg.targets, &templates)?;

    let options = RunOptions::from(cfg);
    let sched = Arc::new(Scheduler::new(Arc::new(HttpNavigator::new())));

    let (tx, rx) = event_channel();
    let printer = tokio::spawn(print_events(rx));

    let mut runner = {
        let sched = Arc::clone(&sched);
        let targets = cfg.targets;
        let shuffle = cfg.shuffle;
        let rerun = cfg.rerun;
        tokio::spawn(async move {
            sched
                .run_repeating(
                    options,
                    rerun,
                    move || build_tasks(&id, &templates, targets, shuffle, &mut rand::thread_rng()),
                    Some(tx),
                )
                .await
        })
    };

    let summary = tokio::select! {
        res = &mut runner => res?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupt received, stopping run");
            sched.stop();
            runner.await?
        }
    };

    let _ = printer.await;

    if summary.cancelled {
        println!(
            "Stopped after {} of {} submission(s).",
            summary.done, summary.total
        );
    } else {
        println!(
            "Finished: {} ok, {} failed.",
            summary.successes(),
            summary.failures()
        );
    }
    Ok(())
}

async fn print_events(mut rx: EventReceiver) {
    while let Some(event) = rx.recv().await {
        match event {
            RunEvent::RunStarted { run, total } => {
                println!("run {}: {} submission(s) queued", run, total);
            }
            RunEvent::TaskStarted {
                label, archive_url, ..
            } => {
                tracing::debug!(%label, %archive_url, "submitting");
            }
            RunEvent::TaskFinished {
                label,
                outcome,
                done,
                total,
                ..
            } => {
                let mark = match outcome {
                    Outcome::Success => "ok",
                    Outcome::Failure => "failed",
                };
                println!("  [{}/{}] {} {}", done, total, label, mark);
            }
            RunEvent::RunFinished { summary, .. } => {
                tracing::info!(
                    run = summary.run,
                    ok = summary.successes(),
                    failed = summary.failures(),
                    cancelled = summary.cancelled,
                    "run finished"
                );
            }
        }
    }
}
