use std::{fmt::Write as _, io::Read, path::Path};

use api_types::{allocation::AllocationRequest, expense::ExpenseForm};
use engine::{
    Currency, Money, Participant, ParticipantId, SplitMode, active_total, apply_manual_override,
    derive_split,
};

use crate::{
    cli::{Command, InputArgs, SplitArgs},
    convert,
    error::{AppError, Result},
    settings::Settings,
};

const TOTAL_LABEL: &str = "total";

/// Runs a subcommand and returns what should be printed on stdout.
pub fn run(command: Command, settings: &Settings) -> Result<String> {
    match command {
        Command::Split(args) => split(&args, settings),
        Command::Allocate(args) => {
            let request: AllocationRequest = serde_json::from_str(&read_input(&args)?)?;
            let response = convert::allocate(&request)?;
            tracing::info!(
                participants = response.participants.len(),
                "allocation computed"
            );
            Ok(serde_json::to_string_pretty(&response)?)
        }
        Command::Expense(args) => {
            let form: ExpenseForm = serde_json::from_str(&read_input(&args)?)?;
            let expense = convert::draft_from_form(&form)?.finalize()?;
            tracing::info!(name = %expense.name, amount = %expense.amount, "expense validated");
            Ok(serde_json::to_string_pretty(&convert::expense_to_wire(&expense))?)
        }
    }
}

fn read_input(args: &InputArgs) -> Result<String> {
    match args.input.as_deref() {
        Some(path) => read_file(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    tracing::debug!("reading {}", path.display());
    Ok(std::fs::read_to_string(path)?)
}

fn parse_participant(raw: &str) -> Result<Participant> {
    let (id, share_weight) = match raw.split_once(':') {
        Some((id, shares)) => {
            let shares: i64 = shares
                .trim()
                .parse()
                .map_err(|_| AppError::Usage(format!("invalid share count in {raw:?}")))?;
            (id, shares.clamp(1, i64::from(u32::MAX)) as u32)
        }
        None => (raw, 1),
    };
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::Usage(format!("missing participant id in {raw:?}")));
    }
    Ok(Participant::new(id).with_share_weight(share_weight))
}

fn parse_override(raw: &str) -> Result<(ParticipantId, Money)> {
    let (id, amount) = raw
        .split_once('=')
        .ok_or_else(|| AppError::Usage(format!("expected id=amount, got {raw:?}")))?;
    Ok((ParticipantId::new(id.trim()), amount.parse()?))
}

fn split(args: &SplitArgs, settings: &Settings) -> Result<String> {
    let mode = args.mode.unwrap_or(settings.default_mode);
    let currency = args.currency.unwrap_or(settings.currency);

    let mut participants = args
        .participants
        .iter()
        .map(|raw| parse_participant(raw))
        .collect::<Result<Vec<_>>>()?;
    for id in &args.inactive {
        let participant = participants
            .iter_mut()
            .find(|p| p.id.as_str() == id.as_str())
            .ok_or_else(|| AppError::Usage(format!("--inactive {id} is not a participant")))?;
        participant.is_active = false;
    }

    let mut split = derive_split(args.total, &participants, mode)?;
    for raw in &args.overrides {
        let (id, amount) = parse_override(raw)?;
        split = apply_manual_override(&split, &id, amount)?;
    }

    let allocated = active_total(&split)?;
    if allocated != args.total {
        tracing::warn!(
            total = %args.total,
            allocated = %allocated,
            "manual overrides leave the split unbalanced"
        );
    }
    Ok(render(&split, mode, args.total, allocated, currency))
}

fn render(
    split: &[Participant],
    mode: SplitMode,
    total: Money,
    allocated: Money,
    currency: Currency,
) -> String {
    let width = split
        .iter()
        .map(|p| p.id.as_str().len())
        .chain([TOTAL_LABEL.len()])
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for participant in split {
        let amount = if participant.is_active {
            participant.amount.display_with(currency)
        } else {
            "-".to_string()
        };
        let _ = write!(out, "{:<width$}  {amount}", participant.id.as_str());
        if mode == SplitMode::Weighted && participant.is_active {
            let _ = write!(out, "  (x{})", participant.share_weight);
        }
        out.push('\n');
    }
    let _ = write!(
        out,
        "{:<width$}  {} of {}",
        TOTAL_LABEL,
        allocated.display_with(currency),
        total.display_with(currency)
    );
    out
}
