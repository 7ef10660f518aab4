mod input;
mod scheduler;

use input::Prompter;
use scheduler::{
    report, DisplayTerminal, FcfsScheduler, PriorityScheduler, Report, RoundRobinScheduler,
    SchedError, SrtfScheduler,
};
use log::warn;
use std::io;

fn default_reports() -> Result<Vec<Report>, SchedError> {
    let mut round_robin = RoundRobinScheduler::new();
    let mut rr_report = Report::run(&mut round_robin, &input::round_robin_dataset(), false)?;
    rr_report.title = format!("{} (quantum {})", rr_report.title, round_robin.quantum());

    Ok(vec![
        Report::run(&mut FcfsScheduler::new(), &input::fcfs_dataset(), false)?,
        Report::run(&mut SrtfScheduler::new(), &input::srtf_dataset(), false)?,
        Report::run(&mut PriorityScheduler::new(), &input::priority_dataset(), true)?,
        rr_report,
    ])
}

fn custom_report<R, W>(prompter: &mut Prompter<R, W>) -> Result<Report, SchedError>
where
    R: io::BufRead,
    W: io::Write,
{
    prompter.say("\nAlgorithms: 1) FCFS  2) SRTF  3) Preemptive Priority  4) Round Robin")?;
    let choice = prompter.ask("Choose an algorithm (1-4): ", |text| {
        match input::parse_count(text)? {
            choice @ 1..=4 => Ok(choice),
            other => Err(SchedError::InvalidChoice(other)),
        }
    })?;

    match choice {
        1 => Report::run(&mut FcfsScheduler::new(), &prompter.ask_processes(false)?, false),
        2 => Report::run(&mut SrtfScheduler::new(), &prompter.ask_processes(false)?, false),
        3 => Report::run(&mut PriorityScheduler::new(), &prompter.ask_processes(true)?, true),
        _ => {
            let quantum = prompter.ask("Enter Time Quantum: ", input::parse_quantum)?;
            let mut scheduler = RoundRobinScheduler::with_quantum(quantum);
            let mut report = Report::run(&mut scheduler, &prompter.ask_processes(false)?, false)?;
            report.title = format!("{} (quantum {})", report.title, quantum);
            Ok(report)
        }
    }
}

/// Lets the user page through the reports in the terminal UI. Returns false when the UI
/// could not be shown, in which case the caller still has the plain-text reports.
fn browse_reports(terminal: io::Result<DisplayTerminal>, reports: &[Report]) -> bool {
    let mut terminal = match terminal {
        Ok(terminal) => terminal,
        Err(err) => {
            warn!("terminal UI unavailable, printing reports only: {}", err);
            return false;
        }
    };
    if let Err(err) = terminal.browse(reports) {
        warn!("terminal UI stopped: {}", err);
        return false;
    }
    true
}

/// Prints the reports, then schedules user-entered processes until the user declines.
fn run_session<R, W>(reports: &[Report], prompter: &mut Prompter<R, W>) -> Result<(), SchedError>
where
    R: io::BufRead,
    W: io::Write,
{
    for default_report in reports {
        prompter.say(&report::render(default_report))?;
    }

    while prompter.ask_yes_no("\nDo you want to try with your own input? (yes/no): ")? {
        match custom_report(prompter) {
            Ok(custom) => prompter.say(&report::render(&custom))?,
            Err(err) if err.is_invalid_input() => {
                warn!("custom schedule rejected: {}", err);
                prompter.say(&format!("  {}", err))?;
            }
            Err(err) => return Err(err),
        }
    }
    prompter.say("\nThank you for using the CPU scheduling simulator!")
}

fn main() -> Result<(), SchedError> {
    env_logger::init();

    let reports = default_reports()?;
    browse_reports(DisplayTerminal::new(), &reports);

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    run_session(&reports, &mut prompter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(script: &str) -> (Result<(), SchedError>, String) {
        let reports = default_reports().unwrap();
        let mut output = Vec::new();
        let result = {
            let mut prompter = Prompter::new(Cursor::new(script.as_bytes()), &mut output);
            run_session(&reports, &mut prompter)
        };
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn missing_terminal_falls_back_to_text() {
        let reports = default_reports().unwrap();
        let no_tty = Err(io::Error::new(io::ErrorKind::Other, "not a terminal"));
        assert!(!browse_reports(no_tty, &reports));
    }

    #[test]
    fn reports_are_printed_before_the_first_prompt() {
        let (result, output) = session("no\n");
        assert!(result.is_ok());

        let prompt = output.find("Do you want to try").unwrap();
        for title in ["First Come First Served", "Shortest Remaining Time First", "Round Robin"] {
            let at = output.find(title).unwrap();
            assert!(at < prompt, "{} printed after the prompt", title);
        }
        assert!(output.contains("| P1 | P2 | P3 | P4 |"));
        assert!(output.ends_with("Thank you for using the CPU scheduling simulator!\n"));
    }

    #[test]
    fn custom_fcfs_run_is_reported() {
        let (result, output) = session("yes\n1\n2\nA\n0\n3\nB\n1\n2\nno\n");
        assert!(result.is_ok());
        assert!(output.contains("| A | B |\n0   3   5\n"));
    }

    #[test]
    fn oversized_custom_input_is_reported_and_the_session_continues() {
        let (result, output) = session("yes\n1\n1\nA\n4294967295\n1\nno\n");
        assert!(result.is_ok());
        assert!(output.contains("4294967296 time units"));
        assert!(output.contains("Thank you"));
    }

    #[test]
    fn closed_input_ends_the_session_with_an_error() {
        let (result, _) = session("yes\n1\n");
        assert!(matches!(result, Err(SchedError::Io(_))));
    }
}
