//! Task building: expand templates into backlinks, then wrap each backlink
//! into one submission task per enabled archive target.

mod wrap;

pub use wrap::{wrap_for_archive_today, wrap_for_wayback, ARCHIVE_TODAY_HOSTS};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Targets;
use crate::error::ConfigError;
use crate::template::{self, TemplateEntry};
use crate::video::VideoId;

/// Which archive service a task submits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveTarget {
    Wayback,
    ArchiveToday,
}

/// One unit of work: submit one backlink to one archive target.
/// Immutable once built; consumed exactly once by exactly one worker.
#[derive(Debug, Clone)]
pub struct Task {
    /// Position of the originating backlink in the expanded list.
    pub index: usize,
    pub target: ArchiveTarget,
    /// Presentation label: "Wayback" or the archive.today mirror host.
    pub label: String,
    /// The derived backlink being archived (pre-wrapping; export artifact).
    pub backlink_url: String,
    /// The submission endpoint actually navigated to.
    pub archive_url: String,
}

/// Tasks for one run plus the ordered backlink list they were built from.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    pub tasks: Vec<Task>,
    pub backlinks: Vec<String>,
}

/// Pre-start validation: a run is refused outright without a target or
/// without any usable template.
pub fn validate_run(targets: Targets, templates: &[TemplateEntry]) -> Result<(), ConfigError> {
    if !targets.any() {
        return Err(ConfigError::NoTargets);
    }
    if !templates.iter().any(|t| t.as_template().is_some()) {
        return Err(ConfigError::NoTemplates);
    }
    Ok(())
}

/// Expand every usable template against the video id, in template order.
pub fn expand_backlinks(id: &VideoId, templates: &[TemplateEntry]) -> Vec<String> {
    templates
        .iter()
        .filter_map(TemplateEntry::as_template)
        .map(|tpl| template::expand(tpl, id))
        .collect()
}

/// Expand every usable template and emit one task per enabled target per
/// backlink. `shuffle` randomizes backlink order before wrapping; the
/// archive.today mirror is drawn per backlink. An empty result is not an
/// error: the scheduler treats it as a completed run with zero progress.
pub fn build_tasks<R: Rng>(
    id: &VideoId,
    templates: &[TemplateEntry],
    targets: Targets,
    shuffle: bool,
    rng: &mut R,
) -> TaskList {
    let mut backlinks = expand_backlinks(id, templates);
    if shuffle {
        backlinks.shuffle(rng);
    }

    let mut tasks = Vec::new();
    for (index, backlink) in backlinks.iter().enumerate() {
        if targets.wayback {
            tasks.push(Task {
                index,
                target: ArchiveTarget::Wayback,
                label: "Wayback".to_string(),
                backlink_url: backlink.clone(),
                archive_url: wrap_for_wayback(backlink),
            });
        }
        if targets.archivetoday {
            let host = ARCHIVE_TODAY_HOSTS[rng.gen_range(0..ARCHIVE_TODAY_HOSTS.len())];
            tasks.push(Task {
                index,
                target: ArchiveTarget::ArchiveToday,
                label: host.to_string(),
                backlink_url: backlink.clone(),
                archive_url: wrap_for_archive_today(backlink, host),
            });
        }
    }

    TaskList { tasks, backlinks }
}

/// Newline-joined plain-text export of the backlink list.
pub fn export_backlinks(backlinks: &[String]) -> String {
    backlinks.join("\n")
}
