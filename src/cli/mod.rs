use self::{apply_frame_map::ApplyFrameMap, batch_crop::BatchCrop};

mod apply_frame_map;
mod batch_crop;

pub enum CliRes {
    Ok,
    Err,
}

pub trait Cli {
    fn name(&self) -> &'static str;
    /// Each module has to handle the arguments by itself.
    ///
    /// `args[1]` is the name of the module. Arguments for the module start at `args[2]`.
    fn cli(&self) -> CliRes;
    fn cli_help(&self);
}

/// Runs the module named by the first argument.
pub fn cli() -> CliRes {
    let args: Vec<String> = std::env::args().collect();

    // Add new modules here.
    let modules: &[&dyn Cli] = &[&ApplyFrameMap, &BatchCrop];

    let help = || {
        println!(
            "\
strident_tools

Available modules:"
        );
        for module in modules {
            println!("{}", module.name());
        }
    };

    if args.len() < 2 {
        help();
        return CliRes::Err;
    }

    for module in modules {
        if args[1] == module.name() {
            return module.cli();
        }
    }

    // In case nothing fits then prints this again.
    help();

    CliRes::Err
}
