//! Interactive console approval gateway.

use std::io::{self, BufRead, Write};

use shelfwise_advisory::Recommendation;
use shelfwise_engine::{ApprovalGateway, Decision};

/// Blocking y/n prompt on stdin.
///
/// Anything other than an explicit yes is a rejection; EOF (piped input
/// running out) rejects the remainder of the run.
pub struct ConsoleGateway;

impl ApprovalGateway for ConsoleGateway {
    fn request_decision(&self, recommendation: &Recommendation) -> Decision {
        println!(
            "[{:?}] {:?}: {}",
            recommendation.priority, recommendation.kind, recommendation.message
        );
        print!("  approve? [y/N] ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => Decision::Rejected,
            Ok(_) => match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => Decision::Approved,
                _ => Decision::Rejected,
            },
        }
    }
}
