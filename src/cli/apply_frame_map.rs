use std::path::PathBuf;

use strident_tools::{config::parse_config, modules::apply_frame_map::FrameMap};

use super::{Cli, CliRes};

pub struct ApplyFrameMap;

impl ApplyFrameMap {
    fn run(&self, args: &[String], placeholder: &str) -> CliRes {
        let [template_path, target_path] = args else {
            self.cli_help();
            return CliRes::Err;
        };

        let template_path = PathBuf::from(template_path);
        let target_path = PathBuf::from(target_path);

        let mut frame_map = FrameMap::new(&template_path, &target_path);
        frame_map.placeholder(placeholder);

        match frame_map.apply() {
            Ok(report) => {
                println!(
                    "Successfully updated {} using {} (Texture ID: {}).",
                    target_path.display(),
                    template_path.display(),
                    report.texture_id
                );

                CliRes::Ok
            }
            Err(err) => {
                println!("{}", err);
                CliRes::Err
            }
        }
    }
}

impl Cli for ApplyFrameMap {
    fn name(&self) -> &'static str {
        "apply_frame_map"
    }

    // In: standard frame map, character .tres to be modified
    fn cli(&self) -> CliRes {
        let args: Vec<String> = std::env::args().skip(2).collect();

        let config = match parse_config() {
            Ok(config) => config,
            Err(err) => {
                println!("Error parsing config.toml: {}", err);
                return CliRes::Err;
            }
        };

        self.run(&args, &config.frame_map.placeholder)
    }

    fn cli_help(&self) {
        println!(
            "\
Copies the frames of a standard frame map into a character .tres.

Keeps the first 4 lines of the character file and replaces the placeholder texture ID
with the one on its third line. The character file is overwritten.

<std_frame_map.tres> <character_map_to_be_modified.tres>
"
        )
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use strident_tools::modules::apply_frame_map::DEFAULT_PLACEHOLDER;

    use super::*;

    const STANDARD_MAP: &str = "h0\nh1\nh2\nh3\natlas = ExtResource(\"1_jud8h\")\n";
    const CHARACTER: &str = "c0\nc1\n[ext_resource path=\"res://orc.png\" id=\"3_orc\"]\nc3\nold\n";

    fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn wrong_arg_count() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("orc.tres");
        fs::write(&target, CHARACTER).unwrap();

        let target_str = target.display().to_string();

        for bad in [vec![], vec![target_str.as_str()], vec!["a", "b", "c"]] {
            assert!(matches!(
                ApplyFrameMap.run(&args(&bad), DEFAULT_PLACEHOLDER),
                CliRes::Err
            ));
        }

        assert_eq!(fs::read_to_string(&target).unwrap(), CHARACTER);
    }

    #[test]
    fn run_ok() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("std_frame_map.tres");
        let target = dir.path().join("orc.tres");

        fs::write(&template, STANDARD_MAP).unwrap();
        fs::write(&target, CHARACTER).unwrap();

        let res = ApplyFrameMap.run(
            &args(&[
                template.display().to_string().as_str(),
                target.display().to_string().as_str(),
            ]),
            DEFAULT_PLACEHOLDER,
        );

        assert!(matches!(res, CliRes::Ok));
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "c0\nc1\n[ext_resource path=\"res://orc.png\" id=\"3_orc\"]\nc3\natlas = ExtResource(\"3_orc\")\n"
        );
    }

    #[test]
    fn run_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("orc.tres");

        fs::write(&target, CHARACTER).unwrap();

        let res = ApplyFrameMap.run(
            &args(&["nowhere.tres", target.display().to_string().as_str()]),
            DEFAULT_PLACEHOLDER,
        );

        assert!(matches!(res, CliRes::Err));
        assert_eq!(fs::read_to_string(&target).unwrap(), CHARACTER);
    }
}
