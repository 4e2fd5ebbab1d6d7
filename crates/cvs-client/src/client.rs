use std::collections::HashMap;
use std::path::Path;
use std::thread;

use cvs_core::{
    CommandInvocation, CvsInfo, CvsOperation, FileStatus, PathProbe, SplitPath, TrackedFile,
    split_path,
};
use cvs_parse::{parse_info, parse_latest_tags, parse_outcome, parse_status};
use tracing::{debug, warn};

use crate::locks::directory_key;
use crate::{
    CommandBuilder, CommandExecutor, CvsError, DirectoryLocks, ProcessExecutor, Result,
    TextEncoding,
};

/// Entry point of the integration layer: builds the command, runs it under the
/// directory's lock and interprets the output.
pub struct CvsClient<E = ProcessExecutor> {
    builder: CommandBuilder,
    executor: E,
    locks: DirectoryLocks,
}

impl CvsClient<ProcessExecutor> {
    #[must_use]
    pub fn with_encoding(encoding: TextEncoding) -> Self {
        Self::new(CommandBuilder::default(), ProcessExecutor::new(encoding))
    }
}

impl Default for CvsClient<ProcessExecutor> {
    fn default() -> Self {
        Self::with_encoding(TextEncoding::default())
    }
}

impl<E: CommandExecutor> CvsClient<E> {
    #[must_use]
    pub fn new(builder: CommandBuilder, executor: E) -> Self {
        Self {
            builder,
            executor,
            locks: DirectoryLocks::new(),
        }
    }

    #[must_use]
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// # Errors
    ///
    /// Returns [`CvsError::InvalidCvsRoot`] if the file's directory is not a
    /// CVS working directory, [`CvsError::Build`] for a path without a file
    /// name, and [`CvsError::Exec`] for any other failure.
    pub fn status(&self, path: &str) -> Result<FileStatus> {
        let stdout = self.run(self.builder.status(path)?)?;
        Ok(parse_status(&stdout))
    }

    /// # Errors
    ///
    /// Same as [`Self::status`].
    pub fn info(&self, path: &str) -> Result<CvsInfo> {
        let stdout = self.run(self.builder.status(path)?)?;
        Ok(parse_info(&stdout))
    }

    /// Tags that point at the file's repository revision.
    ///
    /// # Errors
    ///
    /// Same as [`Self::status`].
    pub fn latest_tags(&self, path: &str) -> Result<Vec<String>> {
        let stdout = self.run(self.builder.status(path)?)?;
        Ok(parse_latest_tags(&stdout))
    }

    /// `Ok(false)` means CVS ran but did not schedule the file.
    ///
    /// # Errors
    ///
    /// Same as [`Self::status`].
    pub fn add(&self, path: &str) -> Result<bool> {
        self.apply(CvsOperation::Add, self.builder.add(path)?)
    }

    /// `Ok(false)` means the file was already current.
    ///
    /// # Errors
    ///
    /// Same as [`Self::status`].
    pub fn update(&self, path: &str) -> Result<bool> {
        self.apply(CvsOperation::Update, self.builder.update(path)?)
    }

    /// # Errors
    ///
    /// Same as [`Self::status`].
    pub fn commit(&self, path: &str, message: &str) -> Result<bool> {
        self.apply(CvsOperation::Commit, self.builder.commit(path, message)?)
    }

    /// Moves (or creates) `tag` onto the given files in `directory`.
    ///
    /// # Errors
    ///
    /// Returns [`CvsError::Build`] for an empty tag or file list, otherwise
    /// the same as [`Self::status`].
    pub fn tag<S: AsRef<str>>(&self, directory: &str, filenames: &[S], tag: &str) -> Result<bool> {
        self.apply(CvsOperation::Tag, self.builder.tag(directory, filenames, tag)?)
    }

    /// Raw `cvs history -alc` report, trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`CvsError::Build`] for an empty file list, otherwise the same
    /// as [`Self::status`].
    pub fn history<S: AsRef<str>>(&self, directory: &str, filenames: &[S]) -> Result<String> {
        let stdout = self.run(self.builder.history(directory, filenames)?)?;
        Ok(stdout.trim().to_string())
    }

    /// Re-queries one file and records the outcome on it. Never fails: errors
    /// become [`FileStatus::NotCvsFile`] or [`FileStatus::Error`].
    pub fn refresh(&self, file: &mut TrackedFile, probe: &dyn PathProbe) -> FileStatus {
        file.resolve(FileStatus::Loading);

        let status = if probe.exists(Path::new(&file.path)) {
            let result = self.status(&file.path);
            if let Err(err) = &result {
                if !err.is_invalid_cvs_root() {
                    warn!(path = %file.path, error = %err, "status query failed");
                }
            }
            status_from_query(&result)
        } else {
            FileStatus::NotFound
        };

        debug!(
            path = %file.path,
            %status,
            reported = status.is_cvs_reported(),
            "file refreshed"
        );
        file.resolve(status);
        status
    }

    /// Refreshes all files, one worker thread per directory. Files in the
    /// same directory are queried in order by that directory's worker.
    pub fn refresh_all(&self, files: &mut [TrackedFile], probe: &dyn PathProbe) {
        let total = files.len();
        let mut groups: HashMap<String, Vec<&mut TrackedFile>> = HashMap::new();
        for file in files.iter_mut() {
            groups.entry(directory_of(&file.path)).or_default().push(file);
        }
        debug!(files = total, workers = groups.len(), "refreshing files");

        thread::scope(|scope| {
            for group in groups.into_values() {
                scope.spawn(move || {
                    for file in group {
                        self.refresh(file, probe);
                    }
                });
            }
        });
    }

    fn apply(&self, operation: CvsOperation, invocation: CommandInvocation) -> Result<bool> {
        let stdout = self.run(invocation)?;
        let applied = parse_outcome(operation, &stdout);
        debug!(%operation, applied, "operation finished");
        Ok(applied)
    }

    fn run(&self, invocation: CommandInvocation) -> Result<String> {
        self.locks
            .with_lock(invocation.working_directory(), || {
                self.executor.execute(&invocation)
            })
            .map_err(CvsError::from)
    }
}

fn directory_of(path: &str) -> String {
    let split = split_path(path).ok();
    directory_key(split.as_ref().and_then(SplitPath::working_directory))
}

/// Collapses a status query into the value shown for the file.
#[must_use]
pub fn status_from_query(result: &Result<FileStatus>) -> FileStatus {
    match result {
        Ok(status) => *status,
        Err(err) if err.is_invalid_cvs_root() => FileStatus::NotCvsFile,
        Err(_) => FileStatus::Error,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::BuildError;
    use crate::mocks::{FixedProbe, MockExecutor, failure};

    const NO_CVSROOT: &str = "cvs status: No CVSROOT specified!  Please use the `-d' option";

    const STATUS_V: &str = "\
===================================================================
File: foo.txt          \tStatus: Locally Modified

   Working revision:\t1.4\tMon Mar  4 10:12:01 2024
   Repository revision:\t1.4\t/cvsroot/proj/foo.txt,v
   Sticky Tag:\t\t(none)

   Existing Tags:
\tREL-2                    \t(revision: 1.4)
\tREL-1                    \t(revision: 1.3)

";

    fn client(executor: MockExecutor) -> CvsClient<MockExecutor> {
        CvsClient::new(CommandBuilder::default(), executor)
    }

    mod queries {
        use super::*;

        #[test]
        fn status_runs_in_file_directory() -> anyhow::Result<()> {
            let client = client(MockExecutor::replying(STATUS_V));

            let status = client.status("/repo/src/foo.txt")?;

            assert_eq!(status, FileStatus::Modified);
            let calls = client.executor().calls();
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].command_line(), "cvs status -v foo.txt");
            assert_eq!(calls[0].working_directory(), Some("/repo/src/"));
            Ok(())
        }

        #[test]
        fn status_without_file_block_is_unknown() -> anyhow::Result<()> {
            let client = client(MockExecutor::replying("cvs status: nothing known about foo.txt"));

            assert_eq!(client.status("/repo/foo.txt")?, FileStatus::Unknown);
            Ok(())
        }

        #[test]
        fn missing_cvsroot_is_invalid_cvs_root() {
            let client = client(MockExecutor::failing(NO_CVSROOT));

            let result = client.status("/tmp/foo.txt");

            assert!(matches!(result, Err(CvsError::InvalidCvsRoot(_))));
            assert_eq!(status_from_query(&result), FileStatus::NotCvsFile);
        }

        #[test]
        fn other_failures_propagate_as_exec_errors() {
            let client = client(MockExecutor::failing("cvs [status aborted]: connect failed"));

            let result = client.status("/repo/foo.txt");

            match &result {
                Err(CvsError::Exec(err)) => {
                    assert_eq!(err.to_string(), "cvs [status aborted]: connect failed");
                }
                other => panic!("expected exec error, got {other:?}"),
            }
            assert_eq!(status_from_query(&result), FileStatus::Error);
        }

        #[test]
        fn malformed_path_never_reaches_executor() {
            let client = client(MockExecutor::replying(STATUS_V));

            let result = client.status("/repo/src/");

            assert!(matches!(
                result,
                Err(CvsError::Build(BuildError::MalformedPath(_)))
            ));
            assert!(client.executor().calls().is_empty());
        }

        #[test]
        fn info_extracts_fields() -> anyhow::Result<()> {
            let client = client(MockExecutor::replying(STATUS_V));

            let info = client.info("/repo/src/foo.txt")?;

            assert_eq!(info.filename, "foo.txt");
            assert_eq!(info.revision, "1.4");
            Ok(())
        }

        #[test]
        fn latest_tags_filters_on_repository_revision() -> anyhow::Result<()> {
            let client = client(MockExecutor::replying(STATUS_V));

            assert_eq!(client.latest_tags("/repo/src/foo.txt")?, ["REL-2"]);
            Ok(())
        }

        #[test]
        fn history_is_trimmed() -> anyhow::Result<()> {
            let client = client(MockExecutor::replying(
                "\nM 2024-03-04 10:12 +0000 dev 1.4 foo.txt proj == <remote>\n\n",
            ));

            let history = client.history("/repo/", &["foo.txt"])?;

            assert_eq!(history, "M 2024-03-04 10:12 +0000 dev 1.4 foo.txt proj == <remote>");
            assert_eq!(client.executor().command_lines(), ["cvs history -alc foo.txt"]);
            Ok(())
        }
    }

    mod operations {
        use super::*;

        #[test]
        fn add_reports_scheduling() -> anyhow::Result<()> {
            let client = client(MockExecutor::replying(
                "scheduling file `foo.txt' for addition\n",
            ));

            assert!(client.add("/repo/foo.txt")?);
            assert_eq!(client.executor().command_lines(), ["cvs add foo.txt"]);
            Ok(())
        }

        #[test]
        fn update_with_new_revision_applied() -> anyhow::Result<()> {
            let client = client(MockExecutor::replying("U foo.txt\n"));

            assert!(client.update("/repo/foo.txt")?);
            Ok(())
        }

        #[test]
        fn update_of_current_file_is_no_change_not_error() -> anyhow::Result<()> {
            let client = client(MockExecutor::replying(""));

            assert!(!client.update("/repo/foo.txt")?);
            Ok(())
        }

        #[test]
        fn commit_passes_message_as_single_argument() -> anyhow::Result<()> {
            let client = client(MockExecutor::replying("Checking in foo.txt;\ndone\n"));

            assert!(client.commit("/repo/foo.txt", "fix: handle \"quotes\"")?);
            let calls = client.executor().calls();
            assert_eq!(
                calls[0].arguments().collect::<Vec<_>>(),
                ["commit", "-m", "fix: handle \"quotes\"", "foo.txt"]
            );
            Ok(())
        }

        #[test]
        fn tag_applies_to_all_files() -> anyhow::Result<()> {
            let client = client(MockExecutor::replying("T a.c\nT b.c\n"));

            assert!(client.tag("/repo/src/", &["a.c", "b.c"], "REL-3")?);
            assert_eq!(client.executor().command_lines(), ["cvs tag -F REL-3 a.c b.c"]);
            Ok(())
        }

        #[test]
        fn tag_with_empty_name_is_not_attempted() {
            let client = client(MockExecutor::replying("T a.c\n"));

            let result = client.tag("/repo/", &["a.c"], "");

            assert!(matches!(result, Err(CvsError::Build(_))));
            assert!(client.executor().calls().is_empty());
        }

        #[test]
        fn commit_failure_is_propagated() {
            let client = client(MockExecutor::failing(
                "cvs commit: Up-to-date check failed for `foo.txt'",
            ));

            let result = client.commit("/repo/foo.txt", "msg");

            assert!(matches!(result, Err(CvsError::Exec(_))));
        }
    }

    mod refresh {
        use super::*;

        #[test]
        fn missing_file_is_not_found_without_running_cvs() -> anyhow::Result<()> {
            let client = client(MockExecutor::replying(STATUS_V));
            let mut file = TrackedFile::new("/repo/gone.txt")?;

            let status = client.refresh(&mut file, &FixedProbe::default());

            assert_eq!(status, FileStatus::NotFound);
            assert_eq!(file.status, FileStatus::NotFound);
            assert!(client.executor().calls().is_empty());
            Ok(())
        }

        #[test]
        fn existing_file_resolves_to_reported_status() -> anyhow::Result<()> {
            let client = client(MockExecutor::replying(STATUS_V));
            let mut file = TrackedFile::new("/repo/src/foo.txt")?;

            client.refresh(&mut file, &FixedProbe::new(["/repo/src/foo.txt"]));

            assert_eq!(file.status, FileStatus::Modified);
            Ok(())
        }

        #[test]
        fn directory_without_cvsroot_is_not_cvs_file() -> anyhow::Result<()> {
            let client = client(MockExecutor::failing(NO_CVSROOT));
            let mut file = TrackedFile::new("/tmp/notes.txt")?;

            client.refresh(&mut file, &FixedProbe::new(["/tmp/notes.txt"]));

            assert_eq!(file.status, FileStatus::NotCvsFile);
            Ok(())
        }

        #[test]
        fn refresh_all_resolves_every_file() -> anyhow::Result<()> {
            let executor = MockExecutor::new(|invocation| match invocation.working_directory() {
                Some("/repo/a/") => Ok("File: x\tStatus: Up-to-date\n".to_string()),
                Some("/repo/b/") => Ok("File: y\tStatus: Locally Added\n".to_string()),
                _ => Err(failure(invocation, NO_CVSROOT)),
            });
            let client = client(executor);
            let mut files = vec![
                TrackedFile::new("/repo/a/x.c")?,
                TrackedFile::new("/repo/a/z.c")?,
                TrackedFile::new("/repo/b/y.c")?,
                TrackedFile::new("/elsewhere/w.c")?,
                TrackedFile::new("/repo/a/missing.c")?,
            ];
            let probe = FixedProbe::new([
                "/repo/a/x.c",
                "/repo/a/z.c",
                "/repo/b/y.c",
                "/elsewhere/w.c",
            ]);

            client.refresh_all(&mut files, &probe);

            let statuses: Vec<_> = files.iter().map(|f| f.status).collect();
            assert_eq!(
                statuses,
                [
                    FileStatus::UpToDate,
                    FileStatus::UpToDate,
                    FileStatus::Added,
                    FileStatus::NotCvsFile,
                    FileStatus::NotFound,
                ]
            );
            assert_eq!(client.executor().calls().len(), 4);
            Ok(())
        }

        #[test]
        fn refresh_all_uses_one_worker_per_directory() -> anyhow::Result<()> {
            let threads = Arc::new(Mutex::new(HashSet::new()));
            let seen = Arc::clone(&threads);
            let client = client(MockExecutor::new(move |_| {
                seen.lock()
                    .expect("thread set lock")
                    .insert(thread::current().id());
                Ok("File: x\tStatus: Up-to-date\n".to_string())
            }));
            let mut paths: Vec<String> = (0..300).map(|i| format!("/repo/a/f{i}.c")).collect();
            paths.push("/repo/b/g.c".to_string());
            paths.push("/repo/c/h.c".to_string());
            let mut files = paths
                .iter()
                .map(|path| TrackedFile::new(path.as_str()))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            let probe = FixedProbe::new(paths.iter().map(String::as_str));

            client.refresh_all(&mut files, &probe);

            assert!(files.iter().all(|f| f.status == FileStatus::UpToDate));
            assert_eq!(client.executor().calls().len(), 302);
            assert_eq!(threads.lock().expect("thread set lock").len(), 3);
            Ok(())
        }

        #[test]
        fn refresh_all_keeps_order_within_a_directory() -> anyhow::Result<()> {
            let client = client(MockExecutor::replying("File: x\tStatus: Up-to-date\n"));
            let mut files = vec![
                TrackedFile::new("/repo/a/3.c")?,
                TrackedFile::new("/repo/a/1.c")?,
                TrackedFile::new("/repo/a/2.c")?,
            ];
            let probe = FixedProbe::new(["/repo/a/3.c", "/repo/a/1.c", "/repo/a/2.c"]);

            client.refresh_all(&mut files, &probe);

            assert_eq!(
                client.executor().command_lines(),
                [
                    "cvs status -v 3.c",
                    "cvs status -v 1.c",
                    "cvs status -v 2.c"
                ]
            );
            Ok(())
        }
    }
}
