// UI layer: an interactive menu using `dialoguer` that stands in for the
// upload page. Each workflow asks for the batch mode, the file and the
// parameters, then hands the form to the controller.

use crate::api::Backend;
use crate::payload::{DetectForm, MinBoxSize, Multiplier, Operation, ResizeForm};
use crate::routes::BatchMode;
use crate::workflow::{Downloader, Outcome, UploadController};
use anyhow::Result;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main interactive menu. Runs until the user chooses "Exit".
pub fn main_menu<B: Backend, D: Downloader>(mut ctl: UploadController<B, D>) -> Result<()> {
    loop {
        let items = ["Detect faces", "Resize images", "Exit"];
        let selection = Select::new()
            .with_prompt("What do you want to do?")
            .items(&items)
            .default(0)
            .interact()?;
        match selection {
            0 => {
                choose_mode(&mut ctl)?;
                let form = detect_form(&ctl)?;
                let outcome = with_spinner("Detecting faces...", || ctl.submit_detect(&form));
                report(&ctl, outcome)?;
            }
            1 => {
                choose_mode(&mut ctl)?;
                let form = resize_form(&ctl)?;
                let outcome = with_spinner("Resizing...", || ctl.submit_resize(&form));
                report(&ctl, outcome)?;
            }
            _ => break,
        }
    }
    Ok(())
}

/// The batch selector. Keeps the current mode as the default choice.
fn choose_mode<B: Backend, D: Downloader>(ctl: &mut UploadController<B, D>) -> Result<()> {
    let values = ["file", "zip"];
    let labels = ["A single image", "A zip archive of images"];
    let current = match ctl.mode() {
        BatchMode::File => 0,
        BatchMode::Zip => 1,
    };
    let idx = Select::new()
        .with_prompt("Process")
        .items(&labels)
        .default(current)
        .interact()?;
    ctl.configure(BatchMode::from_selector(values[idx]));
    Ok(())
}

/// Ask for the input file. An empty answer means nothing was selected;
/// the controller turns that into an alert.
fn choose_file<B: Backend, D: Downloader>(
    ctl: &UploadController<B, D>,
) -> Result<Option<PathBuf>> {
    let exts = ctl.accepted_extensions();
    let prompt = format!("File path ({})", exts.join(","));
    let answer: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            let input = input.trim();
            if input.is_empty() || ctl.accepts(Path::new(input)) {
                Ok(())
            } else {
                Err(format!("expected one of {}", exts.join(", ")))
            }
        })
        .interact_text()?;
    let answer = answer.trim();
    Ok((!answer.is_empty()).then(|| PathBuf::from(answer)))
}

fn detect_form<B: Backend, D: Downloader>(ctl: &UploadController<B, D>) -> Result<DetectForm> {
    let defaults = DetectForm::default();
    let file = choose_file(ctl)?;
    let max_faces: u32 = Input::new()
        .with_prompt("Max number of faces per image")
        .default(defaults.max_faces)
        .interact_text()?;
    let min_size: String = Input::new()
        .with_prompt("Minimum face box size (WIDTHxHEIGHT)")
        .default(defaults.min_size.to_string())
        .validate_with(|input: &String| MinBoxSize::parse(input).map(|_| ()))
        .interact_text()?;
    let min_size = MinBoxSize::parse(&min_size)?;

    let ops: Vec<&str> = Operation::ALL.iter().map(|op| op.as_str()).collect();
    let default_op = Operation::ALL
        .iter()
        .position(|op| *op == defaults.operation)
        .unwrap_or(0);
    let op_idx = Select::new()
        .with_prompt("Operation")
        .items(&ops)
        .default(default_op)
        .interact()?;

    let mults: Vec<String> = (1..=Multiplier::MAX).map(|m| format!("{}x", m)).collect();
    let mult_idx = Select::new()
        .with_prompt("Size multiplier")
        .items(&mults)
        .default(usize::from(defaults.multiplier.get() - 1))
        .interact()?;

    Ok(DetectForm {
        file,
        max_faces,
        min_size,
        operation: Operation::ALL[op_idx],
        // mult_idx < MAX
        multiplier: Multiplier::try_from(mult_idx as u8 + 1)?,
    })
}

fn resize_form<B: Backend, D: Downloader>(ctl: &UploadController<B, D>) -> Result<ResizeForm> {
    let file = choose_file(ctl)?;
    let new_width: u32 = Input::new()
        .with_prompt("New width in pixels (0 keeps aspect ratio)")
        .default(0)
        .interact_text()?;
    let new_height: u32 = Input::new()
        .with_prompt("New height in pixels (0 keeps aspect ratio)")
        .default(0)
        .interact_text()?;
    Ok(ResizeForm {
        file,
        new_width,
        new_height,
    })
}

/// Run `f` while a spinner is shown.
fn with_spinner<T>(msg: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = f();
    spinner.finish_and_clear();
    out
}

fn report<B: Backend, D: Downloader>(ctl: &UploadController<B, D>, outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Alert(err) => {
            // Blocks until acknowledged, like an alert dialog.
            Select::new()
                .with_prompt(format!("!! {}", err))
                .items(&["OK"])
                .default(0)
                .interact()?;
        }
        Outcome::Downloaded(path) => println!("Saved {}", path.display()),
        Outcome::Failed(_) => println!("Status: {}", ctl.status()),
    }
    Ok(())
}
