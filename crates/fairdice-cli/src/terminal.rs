//! Interactive opponent reading choices from a terminal.

use crate::table::render_probability_table;
use async_trait::async_trait;
use colored::Colorize;
use fairdice_core::dice::DieSet;
use fairdice_core::game::{GameEvent, Opponent, RoundResult, Stage};
use fairdice_core::peer::{PeerContributionProvider, PeerError};
use fairdice_core::protocol::{Actor, CommitMessage, Outcome, RevealMessage};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{debug, warn};

const CONTRIBUTION_HELP: &str =
    "Select a number to add to the computer's hidden number for fair random generation.";
const INVALID_SELECTION: &str = "Invalid selection. Please try again.";

/// One answer at a menu prompt
#[derive(Debug, PartialEq, Eq)]
enum Choice {
    Exit,
    Help,
    Entry(String),
}

impl Choice {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.eq_ignore_ascii_case("x") {
            Choice::Exit
        } else if line == "?" {
            Choice::Help
        } else {
            Choice::Entry(line.to_string())
        }
    }
}

/// Human opponent behind a line-oriented terminal.
///
/// Every menu offers `X - exit` and `? - help`; exit (or end of input)
/// cancels the round, anything unrecognised re-prompts.
pub struct TerminalPeer<R, W> {
    lines: Lines<R>,
    out: W,
    stage: Stage,
    pending: Option<CommitMessage>,
}

impl<R, W> TerminalPeer<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
            stage: Stage::FirstMove,
            pending: None,
        }
    }

    /// Give back the output sink
    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.out
    }

    async fn read_choice(&mut self) -> Result<Choice, PeerError> {
        write!(self.out, "Your selection: ")?;
        self.out.flush()?;

        match self.lines.next_line().await? {
            Some(line) => Ok(Choice::parse(&line)),
            None => {
                debug!("input closed");
                writeln!(self.out)?;
                Ok(Choice::Exit)
            }
        }
    }

    fn menu_footer(&mut self) -> Result<(), PeerError> {
        writeln!(self.out, "X - exit")?;
        writeln!(self.out, "? - help")?;
        Ok(())
    }

    fn contribution_prompt(&self, modulus: u64) -> String {
        match self.stage {
            Stage::FirstMove => "Try to guess my selection.".to_string(),
            Stage::Roll(_) => format!("Add your number modulo {modulus}."),
        }
    }
}

#[async_trait]
impl<R, W> PeerContributionProvider for TerminalPeer<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn contribute(&mut self, commit: &CommitMessage) -> Result<Outcome<i64>, PeerError> {
        let modulus = commit
            .modulus()
            .map_err(|_| PeerError::InvalidRange(commit.run_id))?;
        self.pending = Some(commit.clone());
        writeln!(
            self.out,
            "I selected a random value in the range {}..{} (HMAC={}).",
            commit.min, commit.max, commit.digest
        )?;
        let prompt = self.contribution_prompt(modulus);
        writeln!(self.out, "{prompt}")?;

        loop {
            for i in commit.min..=commit.max {
                writeln!(self.out, "{i} - {i}")?;
            }
            self.menu_footer()?;

            match self.read_choice().await? {
                Choice::Exit => return Ok(Outcome::Cancelled),
                Choice::Help => writeln!(self.out, "{CONTRIBUTION_HELP}")?,
                Choice::Entry(entry) => match entry.parse::<i64>() {
                    Ok(value) if commit.accepts(value) => return Ok(Outcome::Completed(value)),
                    _ => writeln!(self.out, "{INVALID_SELECTION}")?,
                },
            }
        }
    }

    async fn reveal(&mut self, reveal: &RevealMessage) -> Result<(), PeerError> {
        let commit = self
            .pending
            .take()
            .filter(|c| c.run_id == reveal.run_id)
            .ok_or(PeerError::UnknownRun(reveal.run_id))?;
        if !reveal.verify(&commit) {
            warn!(run_id = %reveal.run_id, "reveal does not match commitment");
            return Err(PeerError::CommitmentMismatch(reveal.run_id));
        }
        let modulus = commit
            .modulus()
            .map_err(|_| PeerError::InvalidRange(commit.run_id))?;

        writeln!(
            self.out,
            "My number is {} (KEY={}).",
            reveal.value, reveal.key
        )?;
        writeln!(
            self.out,
            "The fair number generation result is {} + {} = {} (mod {}).",
            reveal.value,
            reveal.peer_value,
            reveal.result,
            modulus
        )?;
        Ok(())
    }
}

#[async_trait]
impl<R, W> Opponent for TerminalPeer<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn choose_die(
        &mut self,
        dice: &DieSet,
        taken: Option<usize>,
    ) -> Result<Outcome<usize>, PeerError> {
        let available = dice.available(taken);
        writeln!(self.out, "Choose your dice:")?;

        loop {
            for &i in &available {
                writeln!(self.out, "{i} - {}", dice[i])?;
            }
            self.menu_footer()?;

            match self.read_choice().await? {
                Choice::Exit => return Ok(Outcome::Cancelled),
                Choice::Help => writeln!(self.out, "{}", render_probability_table(dice))?,
                Choice::Entry(entry) => match entry.parse::<usize>() {
                    Ok(index) if available.contains(&index) => {
                        return Ok(Outcome::Completed(index))
                    }
                    _ => writeln!(self.out, "{INVALID_SELECTION}")?,
                },
            }
        }
    }

    async fn observe(&mut self, event: &GameEvent) -> Result<(), PeerError> {
        match event {
            GameEvent::StageStarted(stage) => {
                self.stage = *stage;
                match stage {
                    Stage::FirstMove => {
                        writeln!(self.out, "Let's determine who makes the first move.")?
                    }
                    Stage::Roll(Actor::Computer) => writeln!(self.out, "It's time for my roll.")?,
                    Stage::Roll(Actor::User) => writeln!(self.out, "It's time for your roll.")?,
                }
            }
            GameEvent::FirstMover(Actor::Computer) => writeln!(self.out, "I make the first move.")?,
            GameEvent::FirstMover(Actor::User) => writeln!(self.out, "You make the first move.")?,
            GameEvent::DieChosen { by, die, .. } => match by {
                Actor::Computer => writeln!(self.out, "I choose the [{die}] dice.")?,
                Actor::User => writeln!(self.out, "You choose the [{die}] dice.")?,
            },
            GameEvent::Rolled { by, value, .. } => match by {
                Actor::Computer => writeln!(self.out, "My roll result is {value}.")?,
                Actor::User => writeln!(self.out, "Your roll result is {value}.")?,
            },
            GameEvent::Finished(summary) => {
                let (computer, user) = (summary.computer_roll, summary.user_roll);
                let verdict = match summary.result {
                    RoundResult::UserWins => format!("You win ({user} > {computer})!").green(),
                    RoundResult::ComputerWins => format!("I win ({computer} > {user})!").red(),
                    RoundResult::Tie => format!("It's a tie ({computer} = {user})!").yellow(),
                };
                writeln!(self.out, "{}", verdict.bold())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairdice_core::crypto::{commit, SecureRandom};
    use fairdice_core::game::GameBoard;
    use fairdice_core::protocol::{combine, FairRandomCoordinator, RunId};

    fn peer(input: &'static str) -> TerminalPeer<&'static [u8], Vec<u8>> {
        TerminalPeer::new(input.as_bytes(), Vec::new())
    }

    fn output(peer: TerminalPeer<&'static [u8], Vec<u8>>) -> String {
        String::from_utf8(peer.into_writer()).unwrap()
    }

    fn classic() -> DieSet {
        DieSet::parse(&["2,2,4,4,9,9", "6,8,1,1,8,6", "7,5,3,7,5,3"]).unwrap()
    }

    fn exchange(value: i64, peer_value: i64) -> (CommitMessage, RevealMessage) {
        let mut source = SecureRandom::new();
        let (key, digest) = commit(&mut source, value).unwrap();
        let run_id = RunId::random(&mut source).unwrap();
        let commit = CommitMessage {
            run_id,
            digest,
            min: 0,
            max: 5,
        };
        let reveal = RevealMessage {
            run_id,
            key,
            value,
            peer_value,
            result: combine(value, peer_value, 6).unwrap(),
        };
        (commit, reveal)
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!(Choice::parse("x"), Choice::Exit);
        assert_eq!(Choice::parse(" X \r"), Choice::Exit);
        assert_eq!(Choice::parse("?"), Choice::Help);
        assert_eq!(Choice::parse(" 3 "), Choice::Entry("3".to_string()));
    }

    #[tokio::test]
    async fn test_contribution_retries_until_valid() {
        let mut peer = peer("7\n?\nabc\n3\n");
        peer.stage = Stage::Roll(Actor::Computer);
        let (commit, _) = exchange(1, 0);

        let outcome = peer.contribute(&commit).await.unwrap();

        assert_eq!(outcome, Outcome::Completed(3));
        let out = output(peer);
        assert!(out.contains(&format!("(HMAC={})", commit.digest)));
        assert!(out.contains("Add your number modulo 6."));
        assert!(out.contains(CONTRIBUTION_HELP));
        assert_eq!(out.matches(INVALID_SELECTION).count(), 2);
        assert_eq!(out.matches("X - exit").count(), 4);
    }

    #[tokio::test]
    async fn test_first_move_prompt() {
        let mut peer = peer("1\n");
        let (mut commit, _) = exchange(0, 1);
        commit.max = 1;

        assert_eq!(peer.contribute(&commit).await.unwrap(), Outcome::Completed(1));
        let out = output(peer);
        assert!(out.contains("I selected a random value in the range 0..1"));
        assert!(out.contains("Try to guess my selection."));
        assert!(out.contains("0 - 0\n1 - 1\nX - exit\n? - help\n"));
    }

    #[tokio::test]
    async fn test_inverted_range_refused_before_prompting() {
        let mut peer = peer("1\n");
        let (mut commit, _) = exchange(0, 1);
        commit.min = 5;
        commit.max = 0;

        assert!(matches!(
            peer.contribute(&commit).await,
            Err(PeerError::InvalidRange(_))
        ));
        let out = output(peer);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_exit_cancels() {
        let mut peer = peer("X\n");
        let (commit, _) = exchange(2, 0);
        assert!(peer.contribute(&commit).await.unwrap().is_cancelled());
    }

    #[tokio::test]
    async fn test_end_of_input_cancels() {
        let mut peer = peer("");
        let (commit, _) = exchange(2, 0);
        assert!(peer.contribute(&commit).await.unwrap().is_cancelled());
    }

    #[tokio::test]
    async fn test_reveal_prints_key_and_combination() {
        let mut peer = peer("4\n");
        let (commit, reveal) = exchange(5, 4);

        peer.contribute(&commit).await.unwrap();
        peer.reveal(&reveal).await.unwrap();

        let out = output(peer);
        assert!(out.contains(&format!("My number is 5 (KEY={}).", reveal.key)));
        assert!(out.contains("The fair number generation result is 5 + 4 = 3 (mod 6)."));
    }

    #[tokio::test]
    async fn test_forged_reveal_rejected() {
        let mut peer = peer("4\n");
        let (commit, mut reveal) = exchange(5, 4);

        peer.contribute(&commit).await.unwrap();
        reveal.value = 2;
        reveal.result = combine(2, 4, 6).unwrap();

        assert!(matches!(
            peer.reveal(&reveal).await,
            Err(PeerError::CommitmentMismatch(_))
        ));
    }

    #[tokio::test]
    async fn test_reveal_for_other_run_rejected() {
        let mut peer = peer("4\n");
        let (commit, _) = exchange(5, 4);
        let (_, other) = exchange(5, 4);

        peer.contribute(&commit).await.unwrap();
        assert!(matches!(
            peer.reveal(&other).await,
            Err(PeerError::UnknownRun(_))
        ));
    }

    #[tokio::test]
    async fn test_choose_die_skips_taken_and_shows_table() {
        colored::control::set_override(false);
        let dice = classic();
        let mut peer = peer("?\n0\n2\n");

        let outcome = peer.choose_die(&dice, Some(0)).await.unwrap();

        assert_eq!(outcome, Outcome::Completed(2));
        let out = output(peer);
        assert!(out.contains("Choose your dice:"));
        assert!(!out.contains("0 - 2,2,4,4,9,9"));
        assert!(out.contains("1 - 6,8,1,1,8,6"));
        assert!(out.contains("PROBABILITY TABLE"));
        assert_eq!(out.matches(INVALID_SELECTION).count(), 1);
    }

    #[tokio::test]
    async fn test_round_messages() {
        colored::control::set_override(false);
        let mut board = GameBoard::new(classic(), FairRandomCoordinator::new());
        // flip, die choice (1, or 2 if the computer took 1), then two rolls
        let mut peer = peer("0\n1\n2\n0\n0\n");

        let summary = board.play(&mut peer).await.unwrap().completed().unwrap();

        let out = output(peer);
        assert!(out.starts_with("Let's determine who makes the first move.\n"));
        assert!(out.contains("It's time for my roll."));
        assert!(out.contains("It's time for your roll."));
        assert!(out.contains(&format!("My roll result is {}.", summary.computer_roll)));
        assert!(out.contains(&format!("Your roll result is {}.", summary.user_roll)));
        assert_eq!(out.matches("(KEY=").count(), 3);
        let verdict = match summary.result {
            RoundResult::UserWins => "You win",
            RoundResult::ComputerWins => "I win",
            RoundResult::Tie => "It's a tie",
        };
        assert!(out.contains(verdict));
    }
}
