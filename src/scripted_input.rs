use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

/// Problems with the contents of a scripted input file.
#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("scripted input file contains no steps")]
    NoSteps,
    #[error("step {index} has non-positive duration {duration}")]
    BadDuration { index: usize, duration: f32 },
}

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ScriptedStep {
    /// Seconds.
    duration: f32,
    #[serde(default)]
    forward: bool,
    #[serde(default)]
    back: bool,
    #[serde(default)]
    left: bool,
    #[serde(default)]
    right: bool,
    /// Mouse pixels per frame.
    #[serde(default)]
    look_x: f32,
    #[serde(default)]
    look_y: f32,
    #[serde(default)]
    strike: bool,
}

/// Input to apply for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScriptedFrame {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub look: (f32, f32),
    pub strike: bool,
}

pub struct ScriptedInputPlayer {
    steps: Vec<ScriptedStep>,
    index: usize,
    time_in_step: f32,
    finished: bool,
}

impl ScriptedInputPlayer {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::from_json(&contents)?)
    }

    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        let file: ScriptedInputFile = serde_json::from_str(contents)?;
        Ok(Self::new(file.steps)?)
    }

    fn new(steps: Vec<ScriptedStep>) -> Result<Self, ScriptError> {
        if steps.is_empty() {
            return Err(ScriptError::NoSteps);
        }
        if let Some((index, step)) = steps
            .iter()
            .enumerate()
            .find(|(_, step)| step.duration.is_nan() || step.duration <= 0.0)
        {
            return Err(ScriptError::BadDuration {
                index,
                duration: step.duration,
            });
        }
        Ok(Self {
            steps,
            index: 0,
            time_in_step: 0.0,
            finished: false,
        })
    }

    /// Whether the last step has run for its full duration.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Input for the frame starting now; then advance by `dt` seconds.
    /// The last step repeats once the script is exhausted.
    pub fn advance(&mut self, dt: f32) -> ScriptedFrame {
        let step = self.steps.get(self.index).cloned().unwrap_or_default();

        self.time_in_step += dt;
        while self.time_in_step >= self.steps[self.index].duration {
            self.time_in_step -= self.steps[self.index].duration;
            if self.index + 1 < self.steps.len() {
                self.index += 1;
            } else {
                self.time_in_step = 0.0;
                self.finished = true;
                break;
            }
        }

        step.into_frame()
    }
}

impl ScriptedStep {
    fn into_frame(self) -> ScriptedFrame {
        ScriptedFrame {
            forward: self.forward,
            back: self.back,
            left: self.left,
            right: self.right,
            look: (self.look_x, self.look_y),
            strike: self.strike,
        }
    }
}
