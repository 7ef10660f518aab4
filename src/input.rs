//! Default process lists and the interactive prompts for custom ones.

use crate::scheduler::{Process, SchedError};
use log::warn;
use std::io::{self, BufRead, Write};

pub fn fcfs_dataset() -> Vec<Process> {
    vec![
        Process::new("P1", 0, 8),
        Process::new("P2", 1, 4),
        Process::new("P3", 2, 9),
        Process::new("P4", 3, 5),
    ]
}

pub fn srtf_dataset() -> Vec<Process> {
    vec![
        Process::new("P1", 3, 1),
        Process::new("P2", 1, 4),
        Process::new("P3", 4, 2),
        Process::new("P4", 0, 6),
        Process::new("P5", 2, 3),
    ]
}

pub fn priority_dataset() -> Vec<Process> {
    vec![
        Process::with_priority("P1", 0, 4, 2),
        Process::with_priority("P2", 1, 3, 3),
        Process::with_priority("P3", 2, 1, 4),
        Process::with_priority("P4", 3, 5, 5),
        Process::with_priority("P5", 4, 2, 5),
    ]
}

pub fn round_robin_dataset() -> Vec<Process> {
    vec![
        Process::new("P1", 0, 5),
        Process::new("P2", 1, 3),
        Process::new("P3", 2, 1),
        Process::new("P4", 3, 2),
        Process::new("P5", 4, 3),
    ]
}

fn parse_number(text: &str) -> Result<i64, SchedError> {
    let text = text.trim();
    text.parse::<i64>()
        .map_err(|_| SchedError::NotANumber(text.to_owned()))
}

pub fn parse_count(text: &str) -> Result<usize, SchedError> {
    let count = parse_number(text)?;
    if count <= 0 {
        return Err(SchedError::InvalidCount(count));
    }
    usize::try_from(count).map_err(|_| SchedError::InvalidCount(count))
}

pub fn validate_pid(text: &str) -> Result<String, SchedError> {
    let pid = text.trim();
    if pid.is_empty() {
        return Err(SchedError::EmptyPid);
    }
    Ok(pid.to_owned())
}

pub fn parse_arrival(text: &str) -> Result<u32, SchedError> {
    let arrival = parse_number(text)?;
    if arrival < 0 {
        return Err(SchedError::NegativeArrival(arrival));
    }
    u32::try_from(arrival).map_err(|_| SchedError::NotANumber(text.trim().to_owned()))
}

pub fn parse_burst(text: &str) -> Result<u32, SchedError> {
    let burst = parse_number(text)?;
    if burst <= 0 {
        return Err(SchedError::NonPositiveBurst(burst));
    }
    u32::try_from(burst).map_err(|_| SchedError::NotANumber(text.trim().to_owned()))
}

pub fn parse_priority(text: &str) -> Result<i32, SchedError> {
    let priority = parse_number(text)?;
    i32::try_from(priority).map_err(|_| SchedError::NotANumber(text.trim().to_owned()))
}

pub fn parse_quantum(text: &str) -> Result<u32, SchedError> {
    let quantum = parse_number(text)?;
    if quantum <= 0 {
        return Err(SchedError::NonPositiveQuantum(quantum));
    }
    u32::try_from(quantum).map_err(|_| SchedError::NotANumber(text.trim().to_owned()))
}

pub fn parse_yes_no(text: &str) -> Result<bool, SchedError> {
    match text.trim().to_lowercase().as_str() {
        "yes" | "y" => Ok(true),
        "no" | "n" => Ok(false),
        other => Err(SchedError::NotYesNo(other.to_owned())),
    }
}

/// Reads prompted lines and re-prompts whenever `parse` rejects the answer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: &str) -> Result<(), SchedError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, SchedError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(line)
    }

    pub fn ask<T, F>(&mut self, prompt: &str, parse: F) -> Result<T, SchedError>
    where
        F: Fn(&str) -> Result<T, SchedError>,
    {
        loop {
            let line = self.read_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_invalid_input() => {
                    warn!("rejected input {:?}: {}", line.trim(), err);
                    writeln!(self.output, "  {}", err)?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    pub fn ask_yes_no(&mut self, prompt: &str) -> Result<bool, SchedError> {
        self.ask(prompt, parse_yes_no)
    }

    /// Prompts for a process list. Reused ids are rejected and asked for again.
    pub fn ask_processes(&mut self, with_priority: bool) -> Result<Vec<Process>, SchedError> {
        let count = self.ask("\nEnter the number of processes: ", parse_count)?;
        if with_priority {
            self.say("\nNote: Higher priority number = Higher priority")?;
        }

        let mut processes: Vec<Process> = Vec::with_capacity(count);
        for i in 0..count {
            writeln!(self.output, "\nProcess {}:", i + 1)?;
            let pid = self.ask(&format!("  Enter Process ID (e.g., P{}): ", i + 1), |text| {
                let pid = validate_pid(text)?;
                if processes.iter().any(|p| p.pid() == pid) {
                    return Err(SchedError::DuplicatePid(pid));
                }
                Ok(pid)
            })?;
            let arrival = self.ask("  Enter Arrival Time: ", parse_arrival)?;
            let burst = self.ask("  Enter Burst Time: ", parse_burst)?;
            let priority = if with_priority {
                self.ask("  Enter Priority: ", parse_priority)?
            } else {
                0
            };
            processes.push(Process::with_priority(&pid, arrival, burst, priority));
        }
        Ok(processes)
    }
}
