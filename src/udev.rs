//! udev device properties.
use crate::exec::CommandRunner;
use std::{
    cell::OnceCell,
    collections::HashMap,
    path::PathBuf,
    rc::Rc,
};
use tracing::debug;

/// Key/value properties udev knows about a device, like `ID_BUS=ata`.
pub trait UdevProperties {
    fn property(&self, name: &str) -> Option<String>;

    fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }
}

impl UdevProperties for HashMap<String, String> {
    fn property(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Parse `udevadm info --query=property` output.
///
/// Lines without a `=` are skipped.
pub fn parse_properties<S: AsRef<str>>(lines: &[S]) -> HashMap<String, String> {
    lines
        .iter()
        .filter_map(|line| {
            let (key, value) = line.as_ref().split_once('=')?;
            Some((key.trim().to_owned(), value.trim().to_owned()))
        })
        .collect()
}

/// The udev database entry for one device file, queried with `udevadm`.
///
/// All properties are fetched on first use and kept.
pub struct UdevDatabase {
    device_file: PathBuf,
    runner: Rc<dyn CommandRunner>,
    properties: OnceCell<HashMap<String, String>>,
}

impl UdevDatabase {
    pub fn new(device_file: impl Into<PathBuf>, runner: Rc<dyn CommandRunner>) -> Self {
        Self {
            device_file: device_file.into(),
            runner,
            properties: OnceCell::new(),
        }
    }

    fn properties(&self) -> &HashMap<String, String> {
        self.properties.get_or_init(|| {
            let name = format!("--name={}", self.device_file.display());
            match self.runner.run("udevadm", &["info", "--query=property", &name]) {
                Ok(lines) => parse_properties(&lines),
                Err(e) => {
                    debug!(device = %self.device_file.display(), error = %e, "No udev properties");
                    HashMap::new()
                }
            }
        })
    }
}

impl UdevProperties for UdevDatabase {
    fn property(&self, name: &str) -> Option<String> {
        self.properties().get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExecError;
    use std::cell::Cell;

    struct Udevadm {
        output: Option<Vec<&'static str>>,
        calls: Cell<usize>,
    }

    impl CommandRunner for Udevadm {
        fn run(&self, program: &str, args: &[&str]) -> Result<Vec<String>, ExecError> {
            assert_eq!(program, "udevadm");
            assert_eq!(args, ["info", "--query=property", "--name=/dev/sdb"]);
            self.calls.set(self.calls.get() + 1);
            match &self.output {
                Some(lines) => Ok(lines.iter().map(|l| l.to_string()).collect()),
                None => Err(ExecError::Failed {
                    command: "udevadm".into(),
                    status: "exit status: 4".into(),
                    stderr: "Unknown device".into(),
                }),
            }
        }
    }

    #[test]
    fn parses_properties() {
        let props = parse_properties(&[
            "DEVNAME=/dev/sda",
            "ID_MODEL=Samsung_SSD_860",
            "garbage",
            "DEVLINKS=/dev/disk/by-id/a /dev/disk/by-path/b",
        ]);
        assert_eq!(props.len(), 3);
        assert_eq!(props["ID_MODEL"], "Samsung_SSD_860");
        assert_eq!(props["DEVLINKS"], "/dev/disk/by-id/a /dev/disk/by-path/b");
    }

    #[test]
    fn queries_once() {
        let runner = Rc::new(Udevadm {
            output: Some(vec!["ID_BUS=usb", "ID_SSD=1"]),
            calls: Cell::new(0),
        });
        let db = UdevDatabase::new("/dev/sdb", runner.clone());
        assert_eq!(db.property("ID_BUS").as_deref(), Some("usb"));
        assert!(db.has_property("ID_SSD"));
        assert!(!db.has_property("ID_PATH"));
        assert_eq!(runner.calls.get(), 1);
    }

    #[test]
    fn failure_means_no_properties() {
        let runner = Rc::new(Udevadm {
            output: None,
            calls: Cell::new(0),
        });
        let db = UdevDatabase::new("/dev/sdb", runner.clone());
        assert_eq!(db.property("ID_BUS"), None);
        assert_eq!(db.property("ID_SSD"), None);
        assert_eq!(runner.calls.get(), 1);
    }
}
