//! Interactive play mode
//!
//! Suggests the best guess each turn and reads back the verdict the game
//! gave it.

use super::{BoardState, CommandError, expected_cost};
use crate::output::formatters::verdict_to_emoji;
use crate::solver::{Board, SearchCache, Solver, compute_guess_heuristic};
use colored::Colorize;
use std::io::{BufRead, Write};

/// Run the interactive loop on `input` and `output` until the user quits or
/// input ends
///
/// # Errors
/// Returns an error on I/O failure.
#[allow(clippy::too_many_lines)] // Interactive game loop requires detailed handling
pub fn run_play<R: BufRead, W: Write>(
    solver: &Solver<'_>,
    cache: &mut SearchCache,
    allowed: u32,
    mut input: R,
    mut output: W,
) -> Result<(), CommandError> {
    let bank = solver.bank();
    writeln!(output, "{}", "Wordle Strategist - Interactive Mode".bright_cyan().bold())?;
    writeln!(
        output,
        "Enter the verdict for each suggested guess, one symbol per letter:"
    )?;
    writeln!(output, "  # or G for correct, ^ or Y for present, - or . for absent")?;
    writeln!(
        output,
        "Type a word first to play it instead, 'win' if solved, 'undo', 'new' or 'quit'.\n"
    )?;

    let mut tokens: Vec<String> = Vec::new();
    loop {
        let state = match BoardState::from_tokens(solver, &tokens, allowed) {
            Ok(state) => state,
            Err(err) => {
                writeln!(output, "{} {err}", "Rejected:".red().bold())?;
                if tokens.len() % 2 == 1 {
                    tokens.pop();
                } else {
                    drop_last_step(&mut tokens);
                }
                continue;
            }
        };
        let turn = state.attempts.next_attempt();
        if state.attempts.remaining() == 0 {
            writeln!(output, "{}", "Out of attempts.".red().bold())?;
            if !ask_new_game(&mut input, &mut output, &mut tokens)? {
                return Ok(());
            }
            continue;
        }

        let Some(best) = solver.find_best_guess(cache, state.attempts, &state.set) else {
            return Err(CommandError::NoTargets);
        };
        let guess = state.board.pending().unwrap_or(best.guess);
        let heuristic = compute_guess_heuristic(bank, &state.set, guess);

        writeln!(output, "{}", "─".repeat(60).cyan())?;
        let remaining = state.set.num_targets();
        writeln!(
            output,
            "Turn {turn}: {remaining} {} remaining",
            if remaining == 1 { "target" } else { "targets" }
        )?;
        writeln!(
            output,
            "Suggested guess: {}",
            bank.text(guess).to_uppercase().bright_yellow().bold()
        )?;
        if best.cost.is_feasible() {
            writeln!(
                output,
                "  Expected cost:  {:.3} per game",
                expected_cost(best.cost, state.set.num_targets())
            )?;
        } else {
            writeln!(
                output,
                "  {}",
                "Some targets can no longer be solved in time".yellow()
            )?;
        }
        writeln!(output, "  Entropy:        {:.3} bits", heuristic.entropy)?;
        writeln!(
            output,
            "  Worst case:     {} targets",
            heuristic.largest_group
        )?;
        if state.set.num_targets() <= 10 {
            let names: Vec<String> = state
                .set
                .targets()
                .iter()
                .map(|&id| bank.text(id).to_uppercase())
                .collect();
            writeln!(output, "  Remaining:      {}", names.join(" "))?;
        }

        let Some(line) = prompt(&mut input, &mut output, "Verdict")? else {
            return Ok(());
        };
        match line.to_lowercase().as_str() {
            "quit" | "q" | "exit" => {
                writeln!(output, "Thanks for playing!")?;
                return Ok(());
            }
            "new" | "n" => {
                tokens.clear();
                writeln!(output, "New game started.\n")?;
            }
            "undo" | "u" => {
                if tokens.is_empty() {
                    writeln!(output, "Nothing to undo.")?;
                } else {
                    drop_last_step(&mut tokens);
                }
            }
            "win" | "solved" => {
                tokens.truncate(state.board.steps().len() * 2);
                tokens.push(bank.text(guess).to_string());
                tokens.push(bank.format_verdict(bank.all_correct()));
                celebrate(solver, &tokens, &mut output)?;
                if !ask_new_game(&mut input, &mut output, &mut tokens)? {
                    return Ok(());
                }
            }
            text => {
                if bank.find_word(text).is_some() {
                    // Replace the suggestion with the user's own guess
                    tokens.truncate(state.board.steps().len() * 2);
                    tokens.push(text.to_string());
                    continue;
                }
                match bank.parse_verdict(text) {
                    Ok(verdict) => {
                        tokens.truncate(state.board.steps().len() * 2);
                        tokens.push(bank.text(guess).to_string());
                        tokens.push(bank.format_verdict(verdict));
                        if verdict == bank.all_correct() {
                            celebrate(solver, &tokens, &mut output)?;
                            if !ask_new_game(&mut input, &mut output, &mut tokens)? {
                                return Ok(());
                            }
                        }
                    }
                    Err(err) => writeln!(output, "{} {err}", "Invalid verdict:".red())?,
                }
            }
        }
    }
}

fn celebrate<W: Write>(
    solver: &Solver<'_>,
    tokens: &[String],
    output: &mut W,
) -> Result<(), CommandError> {
    let bank = solver.bank();
    let board = Board::parse(bank, tokens)?;
    let steps = board.steps();

    writeln!(output, "\n{}", "═".repeat(60).bright_cyan())?;
    writeln!(
        output,
        "{}",
        format!(
            "Solved in {} {}!",
            steps.len(),
            if steps.len() == 1 { "guess" } else { "guesses" }
        )
        .bright_green()
        .bold()
    )?;
    for (i, &(guess, verdict)) in steps.iter().enumerate() {
        writeln!(
            output,
            "  {}. {} {}",
            i + 1,
            bank.text(guess).to_uppercase(),
            verdict_to_emoji(verdict, bank.word_len())
        )?;
    }
    writeln!(output, "{}", "═".repeat(60).bright_cyan())?;
    Ok(())
}

/// Drop the last played step along with any pending guess
fn drop_last_step(tokens: &mut Vec<String>) {
    let steps = tokens.len() / 2;
    tokens.truncate(steps.saturating_sub(1) * 2);
}

/// Ask whether to play again, clearing the board if so
fn ask_new_game<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    tokens: &mut Vec<String>,
) -> Result<bool, CommandError> {
    let again = prompt(input, output, "Play again? (yes/no)")?
        .is_some_and(|answer| matches!(answer.to_lowercase().as_str(), "yes" | "y"));
    if again {
        tokens.clear();
        writeln!(output, "New game started.\n")?;
    } else {
        writeln!(output, "Thanks for playing!")?;
    }
    Ok(again)
}

/// Read one trimmed line, `None` at end of input
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<Option<String>, CommandError> {
    write!(output, "{label}: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
