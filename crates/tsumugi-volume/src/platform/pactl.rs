//! Volume control through the PulseAudio `pactl` tool (also provided by
//! PipeWire's pulse compatibility layer).
//!
//! `pactl get-sink-volume` has no structured output mode, so the reader
//! is pinned to its text layout. The first line looks like:
//!
//! ```text
//! Volume: front-left: 26214 /  40% / -23.88 dB,   front-right: 26214 /  40% / -23.88 dB
//! ```
//!
//! and the first `NN%` field on it is taken as the level.

use std::process::Command;

use tracing::debug;

use crate::{VolumeBackend, VolumeError, VolumeLevel};

const DEFAULT_PROGRAM: &str = "pactl";
const DEFAULT_SINK: &str = "@DEFAULT_SINK@";

#[derive(Debug, Clone)]
pub struct PactlBackend {
    program: String,
    sink: String,
}

impl Default for PactlBackend {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, DEFAULT_SINK)
    }
}

impl PactlBackend {
    pub fn new(program: impl Into<String>, sink: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            sink: sink.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String, VolumeError> {
        debug!(program = %self.program, ?args, "running mixer command");
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| VolumeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(VolumeError::Command {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VolumeBackend for PactlBackend {
    fn name(&self) -> &'static str {
        "pactl"
    }

    fn get_volume(&self) -> Result<VolumeLevel, VolumeError> {
        let stdout = self.run(&["get-sink-volume", &self.sink])?;
        parse_sink_volume(&stdout)
    }

    fn set_volume(&self, level: VolumeLevel) -> Result<(), VolumeError> {
        let percent = format!("{}%", level.percent());
        self.run(&["set-sink-volume", &self.sink, &percent])?;
        Ok(())
    }
}

/// Read the level from `pactl get-sink-volume` output.
pub fn parse_sink_volume(output: &str) -> Result<VolumeLevel, VolumeError> {
    let line = output
        .lines()
        .next()
        .ok_or_else(|| VolumeError::Output(output.to_string()))?;

    line.split(|c: char| c == '/' || c == ',' || c.is_whitespace())
        .find_map(|field| field.strip_suffix('%')?.parse::<f64>().ok())
        .map(VolumeLevel::from_percent)
        .ok_or_else(|| VolumeError::Output(line.to_string()))
}
