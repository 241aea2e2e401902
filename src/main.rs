use std::{env, fs::File, io, path::PathBuf, process};

use jdump_class_file::{write_report, ClassFile, ClassFileError};
use memmap::Mmap;
use thiserror::Error;

#[derive(Debug, Error)]
enum JdumpError {
    #[error("usage: jdump <path/to/Class.class>")]
    Usage,
    #[error(transparent)]
    IOError(#[from] io::Error),
    #[error(transparent)]
    ClassFile(#[from] ClassFileError),
}

fn main() {
    pretty_env_logger::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), JdumpError> {
    let path = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or(JdumpError::Usage)?;
    log::debug!("reading {}", path.display());

    let file = File::open(&path)?;
    // Zero-length files cannot be mapped.
    let class_file = if file.metadata()?.len() == 0 {
        ClassFile::parse(&[])?
    } else {
        let mmap = unsafe { Mmap::map(&file)? };
        ClassFile::parse(&mmap)?
    };
    write_report(&class_file, io::stdout().lock())?;

    Ok(())
}
