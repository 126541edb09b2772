//! Built-in table of sample videos used to exercise CompressVideo.
//!
//! All entries are royalty-free clips from the Intel IoT devkit sample set.

use std::fmt;
use std::path::{Path, PathBuf};

/// Rough content category of a sample clip (drives which encoder preset it tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCategory {
    Animation,
    Gaming,
    Documentary,
    Screencast,
}

impl VideoCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            VideoCategory::Animation => "animation",
            VideoCategory::Gaming => "gaming",
            VideoCategory::Documentary => "documentary",
            VideoCategory::Screencast => "screencast",
        }
    }
}

impl fmt::Display for VideoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configured download job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    /// File name under the destination directory.
    pub name: String,
    /// Remote locator.
    pub url: String,
    /// Shown when the download starts.
    pub description: String,
    pub category: VideoCategory,
    /// Approximate size in MB. Informational only; never checked.
    pub size_mb: u32,
}

impl DownloadTask {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
        category: VideoCategory,
        size_mb: u32,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: description.into(),
            category,
            size_mb,
        }
    }

    /// Path this task is written to inside `dir`.
    pub fn destination(&self, dir: &Path) -> PathBuf {
        dir.join(&self.name)
    }
}

const SAMPLE_BASE: &str = "https://github.com/intel-iot-devkit/sample-videos/raw/master";

/// The fixed list of sample videos, in display order.
pub fn test_videos() -> Vec<DownloadTask> {
    vec![
        DownloadTask::new(
            "car_detection.mp4",
            format!("{}/car-detection.mp4", SAMPLE_BASE),
            "Car detection video (similar to animation/gaming)",
            VideoCategory::Animation,
            2,
        ),
        DownloadTask::new(
            "people_detection.mp4",
            format!("{}/people-detection.mp4", SAMPLE_BASE),
            "People detection footage (similar to gaming)",
            VideoCategory::Gaming,
            2,
        ),
        DownloadTask::new(
            "nature_documentary.mp4",
            format!("{}/face-demographics-walking.mp4", SAMPLE_BASE),
            "Nature/Documentary sample",
            VideoCategory::Documentary,
            2,
        ),
        DownloadTask::new(
            "screencast_sample.mp4",
            format!("{}/classroom.mp4", SAMPLE_BASE),
            "Screencast/Classroom sample",
            VideoCategory::Screencast,
            1,
        ),
    ]
}
