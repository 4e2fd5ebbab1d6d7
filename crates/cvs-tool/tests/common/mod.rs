#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Stands in for a CVS client. Every call is appended to `calls.log` as
/// `<cwd>\t<args>`.
const FAKE_CVS: &str = r#"#!/bin/sh
printf '%s\t%s\n' "$(pwd)" "$*" >> '@LOG@'
op="$1"
shift
case "$op" in
  status)
    name="$2"
    case "$name" in
      orphan*)
        echo "cvs status: No CVSROOT specified!  Please use the '-d' option" >&2
        exit 1
        ;;
      broken*)
        echo "cvs [status aborted]: connect to server failed" >&2
        exit 1
        ;;
      added*) marker="Locally Added" ;;
      *) marker="Locally Modified" ;;
    esac
    printf '===================================================================\n'
    printf 'File: %s          \tStatus: %s\n\n' "$name" "$marker"
    printf '   Working revision:\t1.4\tMon Mar  4 10:12:01 2024\n'
    printf '   Repository revision:\t1.5\t/cvsroot/proj/%s,v\n' "$name"
    printf '   Sticky Tag:\t\t(none)\n\n'
    printf '   Existing Tags:\n'
    printf '\tREL-2                    \t(revision: 1.5)\n'
    printf '\tREL-1                    \t(revision: 1.4)\n'
    printf '\tREL-3                    \t(revision: 1.5)\n'
    ;;
  add)
    printf 'scheduling file %s for addition\n' "$1"
    ;;
  update)
    case "$1" in
      current*) ;;
      *) printf 'U %s\n' "$1" ;;
    esac
    ;;
  commit)
    printf 'Checking in %s;\ndone\n' "$3"
    ;;
  tag)
    shift 2
    for file in "$@"; do
      printf 'T %s\n' "$file"
    done
    ;;
  history)
    printf '\nM 2024-03-04 10:12 +0000 alice 1.4 %s proj == <remote>\n\n' "$2"
    ;;
  *)
    echo "cvs: unknown command $op" >&2
    exit 1
    ;;
esac
"#;

pub struct FakeCvs {
    dir: TempDir,
    program: PathBuf,
    log: PathBuf,
}

impl FakeCvs {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let bin = dir.path().join("bin");
        fs::create_dir_all(&bin).expect("create bin dir");
        fs::create_dir_all(dir.path().join("work")).expect("create work dir");

        let log = dir.path().join("calls.log");
        let program = bin.join("cvs");
        let script = FAKE_CVS.replace("@LOG@", &log.display().to_string());
        fs::write(&program, script).expect("write fake cvs");
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755))
            .expect("make fake cvs executable");

        Self { dir, program, log }
    }

    /// Directory the tool is run from.
    pub fn work(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn program_arg(&self) -> String {
        self.program.display().to_string()
    }

    pub fn touch(&self, relative: &str) -> PathBuf {
        let path = self.work().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, "").expect("write tracked file");
        path
    }

    pub fn calls(&self) -> String {
        fs::read_to_string(&self.log).unwrap_or_default()
    }
}
