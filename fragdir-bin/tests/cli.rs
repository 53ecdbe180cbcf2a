#[cfg(test)]
mod cli {
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::{
        prelude::PredicateBooleanExt,
        str::{contains, diff, is_empty},
    };
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use std::{error::Error, fs, io::Write};
    use tempfile::{NamedTempFile, tempdir};

    type Result<T> = std::result::Result<T, Box<dyn Error>>;

    const MIXED: &str = "#:~:text=linked%20URL,%2D's%20format&text=Deprecated-,attributes,attribute&mydirectives=bbrown&mydirection=maitreGims";

    #[test]
    fn test_plain_output_is_canonical() {
        cargo_bin_cmd!()
            .arg(MIXED)
            .assert()
            .success()
            .stdout(diff(format!("{MIXED}\n")));
    }

    #[test]
    fn test_normalizes_whitespace_and_prefix() {
        cargo_bin_cmd!()
            .arg("--")
            .arg(":~:text=with-,repeated, For, -instance")
            .arg("https://example.com/page#section:~:text=linked%20URL,-'s%20format")
            .assert()
            .success()
            .stdout(
                "#:~:text=with-,repeated,For,-instance\n\
                https://example.com/page#section:~:text=linked%20URL,-'s%20format\n",
            );
    }

    #[test]
    fn test_json_output() -> Result<()> {
        let output = cargo_bin_cmd!()
            .arg("--format")
            .arg("json")
            .arg(MIXED)
            .output()?;
        assert!(output.status.success());

        let json: Value = serde_json::from_slice(&output.stdout)?;
        let report = &json[0];
        assert_eq!(report["input"], MIXED);
        assert_eq!(report["output"], MIXED);
        assert_eq!(report["directives"].as_array().map(Vec::len), Some(4));
        assert_eq!(report["directives"][0]["text"]["start"], "linked URL");
        assert_eq!(report["directives"][0]["text"]["end"], "-'s format");
        assert_eq!(report["directives"][1]["text"]["prefix"], "Deprecated");
        assert_eq!(report["directives"][3]["name"], "mydirection");
        assert_eq!(report["directives"][3]["value"], "maitreGims");
        Ok(())
    }

    #[test]
    fn test_markdown_output() {
        cargo_bin_cmd!()
            .arg("--format")
            .arg("markdown")
            .arg(":~:text=start,end&note=x")
            .assert()
            .success()
            .stdout(contains("## :~:text=start,end&note=x"))
            .stdout(contains("| 0 | text |  | start | end |  |"))
            .stdout(contains("| 1 | note |  | x |  |  |"));
    }

    #[test]
    fn test_malformed_input_fails() {
        cargo_bin_cmd!()
            .arg("#:~:text=start&unknownDirective&note=x")
            .assert()
            .failure()
            .code(2)
            .stdout(is_empty())
            .stderr(contains("unknownDirective"));
    }

    #[test]
    fn test_other_inputs_survive_a_failure() {
        cargo_bin_cmd!()
            .arg("text=a,b,c,d,e")
            .arg("text=ok")
            .assert()
            .code(2)
            .stdout("#:~:text=ok\n");
    }

    #[test]
    fn test_lenient_skips_malformed_directives() {
        cargo_bin_cmd!()
            .arg("--lenient")
            .arg("#:~:text=start&unknownDirective&note=x")
            .assert()
            .success()
            .stdout("#:~:text=start&note=x\n");
    }

    #[test]
    fn test_edits() {
        cargo_bin_cmd!()
            .arg("--remove")
            .arg("0,7")
            .arg("--append")
            .arg("text=appended")
            .arg("--text-only")
            .arg("--")
            .arg(MIXED)
            .assert()
            .success()
            .stdout("#:~:text=Deprecated-,attributes,attribute&text=appended\n");
    }

    #[test]
    fn test_url_without_directive() {
        cargo_bin_cmd!()
            .arg("--append")
            .arg("text=start")
            .arg("--")
            .arg("https://example.com/#top")
            .assert()
            .success()
            .stdout("https://example.com/#top:~:text=start\n");
    }

    #[test]
    fn test_invalid_append() {
        cargo_bin_cmd!()
            .arg("--append")
            .arg("foobar")
            .arg("--")
            .arg("text=start")
            .assert()
            .failure()
            .code(1)
            .stderr(contains("Invalid directive to append: `foobar`"));
    }

    #[test]
    fn test_stdin_input() {
        cargo_bin_cmd!()
            .arg("-")
            .write_stdin(":~:text=first\n\nhttps://example.com/#:~:text=second\n")
            .assert()
            .success()
            .stdout("#:~:text=first\nhttps://example.com/#:~:text=second\n");
    }

    #[test]
    fn test_config_file() -> Result<()> {
        let mut config = NamedTempFile::new()?;
        writeln!(config, "text_only = true")?;
        writeln!(config, "append = [\"note=y\"]")?;

        cargo_bin_cmd!()
            .arg("--config")
            .arg(config.path())
            .arg(":~:note=x&text=start")
            .assert()
            .success()
            .stdout("#:~:text=start\n");

        Ok(())
    }

    #[test]
    fn test_cli_overrides_config_file() -> Result<()> {
        let mut config = NamedTempFile::new()?;
        writeln!(config, "format = \"json\"")?;

        cargo_bin_cmd!()
            .arg("--config")
            .arg(config.path())
            .arg("--format")
            .arg("markdown")
            .arg(":~:text=start")
            .assert()
            .success()
            .stdout(contains("| 0 | text |").and(contains("\"input\"").not()));

        Ok(())
    }

    #[test]
    fn test_invalid_config_file() -> Result<()> {
        let mut config = NamedTempFile::new()?;
        writeln!(config, "no_such_option = true")?;

        cargo_bin_cmd!()
            .arg("--config")
            .arg(config.path())
            .arg("text=start")
            .assert()
            .failure()
            .code(3)
            .stderr(contains("Cannot load configuration file"))
            .stderr(contains(concat!("fragdir v", env!("CARGO_PKG_VERSION"))));

        Ok(())
    }

    #[test]
    fn test_invalid_default_config() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("fragdir.toml"), "lenient = \"yes please\"")?;

        cargo_bin_cmd!()
            .current_dir(dir.path())
            .arg("text=start")
            .assert()
            .failure()
            .code(3)
            .stderr(contains("Cannot load default configuration file"));

        Ok(())
    }

    #[test]
    fn test_verbose_logs_to_stderr() {
        cargo_bin_cmd!()
            .arg("-v")
            .arg(":~:text=start")
            .env_remove("RUST_LOG")
            .assert()
            .success()
            .stdout("#:~:text=start\n")
            .stderr(contains("[DEBUG] text directive: text=start"));
    }
}
