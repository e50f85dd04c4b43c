use neighborly_utils::constants::PROGRESS_RESET_DELAY_MS;

/// Checkpoints of a comment submission, displayed as a progress bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitProgress {
    #[default]
    Idle,
    Started,
    Sending,
    Created,
    Refreshing,
    Done,
}

impl SubmitProgress {
    pub fn percent(self) -> u8 {
        match self {
            SubmitProgress::Idle => 0,
            SubmitProgress::Started => 10,
            SubmitProgress::Sending => 40,
            SubmitProgress::Created => 70,
            SubmitProgress::Refreshing => 90,
            SubmitProgress::Done => 100,
        }
    }

    pub fn reset_delay() -> std::time::Duration {
        std::time::Duration::from_millis(PROGRESS_RESET_DELAY_MS)
    }
}

/// Progress of the latest submission. Updates tagged with an earlier submission are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressTracker {
    progress: SubmitProgress,
    submission: u64,
}

impl ProgressTracker {
    /// Starts a new submission and returns its tag.
    pub fn start(&mut self) -> u64 {
        self.submission += 1;
        self.progress = SubmitProgress::Started;
        self.submission
    }

    /// Sets the progress of `submission`, returns whether it is still the latest one.
    pub fn set(&mut self, submission: u64, progress: SubmitProgress) -> bool {
        if submission != self.submission {
            return false;
        }
        self.progress = progress;
        true
    }

    pub fn progress(&self) -> SubmitProgress {
        self.progress
    }
}
