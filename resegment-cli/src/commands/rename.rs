//! Implementation of the 'rename' subcommand.

use crate::cli::RenameArgs;
use crate::error::CliResult;
use crate::output::{self, EXIT_PARTIAL_FAILURE, EXIT_SUCCESS};

use resegment_core::config::{CoreConfigBuilder, DEFAULT_RENAME_EXTENSIONS, extension_list};
use resegment_core::rename::{plan_renames, rename_all_in};
use resegment_core::CoreError;

use log::info;

pub fn run_rename(args: RenameArgs) -> CliResult<i32> {
    if !args.directory.is_dir() {
        return Err(CoreError::PathError(format!(
            "'{}' is not a directory",
            args.directory.display()
        )));
    }

    let extensions = if args.extensions.is_empty() {
        extension_list(DEFAULT_RENAME_EXTENSIONS)
    } else {
        args.extensions.clone()
    };
    let config = CoreConfigBuilder::new().rename_extensions(extensions).build();
    config.validate()?;

    let report = if args.dry_run {
        info!("Dry run: nothing will be moved");
        plan_renames(&args.directory, &config.rename_extensions)?
    } else {
        rename_all_in(
            &args.directory,
            &config.rename_extensions,
            &config.scratch_dir_name,
        )?
    };

    output::report_rename(&report, args.json)?;
    Ok(if report.is_clean() {
        EXIT_SUCCESS
    } else {
        EXIT_PARTIAL_FAILURE
    })
}
