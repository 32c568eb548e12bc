//! Integration tests for the vfsh REPL.
//!
//! These tests load CSV descriptions from disk and run scripts through the
//! REPL the way the binary does.

use std::io::Write;

use tempfile::NamedTempFile;
use vfsh_kernel::ShellConfig;
use vfsh_repl::Repl;

const SAMPLE_CSV: &str = "\
path,type,content,encoding
/home,directory,,
/home/user,directory,,
/home/user/readme.txt,file,Welcome to vfsh,
/home/user/secret.bin,file,aGVsbG8gd29ybGQ=,base64
/etc/motd,file,Have a nice day,
/var/log/syslog,file,,
";

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

fn repl_over(contents: &str) -> (NamedTempFile, Repl) {
    let file = csv_file(contents);
    let repl = Repl::new(&ShellConfig::with_vfs(file.path())).expect("Failed to create REPL");
    (file, repl)
}

/// Helper to run multiple lines through a REPL and collect outputs.
fn run_script(repl: &mut Repl, script: &str) -> Vec<String> {
    let mut outputs = Vec::new();

    for line in script.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(result) = repl.process_line(line) {
            outputs.push(format!("{}{}", result.out, result.err));
        }
        if repl.should_exit() {
            break;
        }
    }

    outputs
}

/// Helper to check if output contains expected strings.
fn outputs_contain(outputs: &[String], expected: &[&str]) -> bool {
    let joined = outputs.join("\n");
    expected.iter().all(|e| joined.contains(e))
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn navigation_and_listing() {
    let (_file, mut repl) = repl_over(SAMPLE_CSV);
    let outputs = run_script(
        &mut repl,
        r#"
        ls /
        cd /home/user
        pwd
        ls -l
    "#,
    );
    assert_eq!(outputs[0], "etc\nhome\nvar");
    assert_eq!(outputs[1], "/home/user");
    assert_eq!(outputs[2], "- 15 readme.txt\n- 11 secret.bin");
}

#[test]
fn prompt_tracks_directory() {
    let (_file, mut repl) = repl_over(SAMPLE_CSV);
    assert!(repl.prompt().ends_with(":/$ "));
    run_script(&mut repl, "cd /var/log");
    assert!(repl.prompt().ends_with(":/var/log$ "));
    run_script(&mut repl, "cd ..\ncd ..\ncd ..");
    assert!(repl.prompt().ends_with(":/$ "));
}

#[test]
fn base64_content_is_decoded() {
    let (_file, mut repl) = repl_over(SAMPLE_CSV);
    let outputs = run_script(&mut repl, "cat /home/user/secret.bin");
    assert_eq!(outputs, vec!["hello world"]);
}

#[test]
fn errors_are_reported_and_playback_continues() {
    let (_file, mut repl) = repl_over(SAMPLE_CSV);
    let outputs = run_script(
        &mut repl,
        r#"
        cd /nowhere
        cat /home
        launch rockets
        echo still here
    "#,
    );
    assert!(outputs_contain(
        &outputs,
        &[
            "cd: /nowhere: No such file or directory",
            "cat: /home: Is a directory",
            "launch: command not found",
            "still here",
        ]
    ));
    assert_eq!(repl.status(), 0);
}

#[test]
fn find_and_tree() {
    let (_file, mut repl) = repl_over(SAMPLE_CSV);
    let outputs = run_script(
        &mut repl,
        r#"
        find / -name .txt
        tree /home
    "#,
    );
    assert_eq!(outputs[0], "/home/user/readme.txt");
    assert_eq!(
        outputs[1],
        "/home\n└── user\n    ├── readme.txt\n    └── secret.bin\n\n1 directory, 2 files"
    );
}

#[test]
fn exit_stops_the_session() {
    let (_file, mut repl) = repl_over(SAMPLE_CSV);
    let outputs = run_script(&mut repl, "exit 3\necho unreachable");
    assert!(outputs.is_empty());
    assert!(repl.should_exit());
    assert_eq!(repl.status(), 3);
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn later_rows_override_earlier_ones() {
    let (_file, mut repl) = repl_over(
        "path,type,content,encoding\n/a.txt,file,first,\n/a.txt,file,second,\n",
    );
    let outputs = run_script(&mut repl, "cat a.txt");
    assert_eq!(outputs, vec!["second"]);
}

#[test]
fn missing_csv_is_an_error() {
    let config = ShellConfig::with_vfs("/definitely/not/here.csv");
    let err = Repl::new(&config).err().expect("load should fail");
    assert!(err.to_string().contains("Failed to load"));
}

#[test]
fn bad_row_leaves_earlier_rows_usable() {
    let (_csv, mut repl) = repl_over(
        "path,type,content\n\
         /etc/motd,file,Have a nice day\n\
         ,file,orphan\n\
         /etc/late,file,unreached\n",
    );
    let outputs = run_script(&mut repl, "cat /etc/motd\nls /etc");
    assert_eq!(outputs[0], "Have a nice day");
    assert_eq!(outputs[1], "motd");
}

#[test]
fn script_file_transcript() {
    let (_csv, mut repl) = repl_over(SAMPLE_CSV);
    let mut script = NamedTempFile::new().expect("temp file");
    writeln!(script, "# show the message of the day").unwrap();
    writeln!(script, "cat /etc/motd").unwrap();
    writeln!(script).unwrap();
    writeln!(script, "cd /etc").unwrap();
    writeln!(script, "exit").unwrap();
    writeln!(script, "pwd").unwrap();

    let transcript = repl.run_script(script.path()).unwrap();
    let lines: Vec<&str> = transcript.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].ends_with(":/$ cat /etc/motd"));
    assert_eq!(lines[1], "Have a nice day");
    assert!(lines[2].ends_with(":/$ cd /etc"));
    assert!(lines[3].ends_with(":/etc$ exit"));
}
