use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use env_logger::{Builder, Target};
use quest_core::config::SystemConfig;

use crate::config_gen;

const CONFIG_PATH: &str = "config.toml";

pub fn init(log_to_stdout: bool) {
    config_gen::ensure_config_exists(CONFIG_PATH);

    if let Err(e) = quest_shared::config::init(CONFIG_PATH) {
        eprintln!("Config load warning: {}", e);
    }

    let sys_cfg: SystemConfig = quest_shared::config::get("system");
    let mut builder = Builder::from_env(env_logger::Env::default().default_filter_or(&sys_cfg.log_level));
    builder.target(log_target(&sys_cfg.log_path, log_to_stdout));
    builder.init();
}

/// 同时写入两个输出
struct Tee<A, B>(A, B);

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.0.write(buf)?;
        self.1.write_all(&buf[..n])?;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.flush()?;
        self.1.flush()
    }
}

// 终端留给游戏输出，默认只写 quest.log；--log-stdout 时另抄一份到 stdout
fn log_target(log_dir: &str, log_to_stdout: bool) -> Target {
    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!("Failed to create log dir: {}", e);
    }

    let file_path = Path::new(log_dir).join("quest.log");
    let file = match OpenOptions::new().create(true).append(true).open(&file_path) {
        Ok(f) => f,
        Err(e) => {
            // 日志文件打不开时退回 stderr
            eprintln!("Failed to open log file {:?}: {}", file_path, e);
            return Target::Stderr;
        }
    };

    if log_to_stdout {
        Target::Pipe(Box::new(Tee(std::io::stdout(), file)))
    } else {
        Target::Pipe(Box::new(file))
    }
}
