//! Fanla Notify CLI
//!
//! 在应用启动时注册通知渠道，并查看/维护渠道注册表

use anyhow::Result;
use clap::{Parser, Subcommand};
use fanla_notify::{
    default_channels, AppConfig, ChannelRegistrar, FileRegistry, Importance, PlatformCapability,
    Registry, RegistrationResult,
};
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "fanla-notify")]
#[command(about = "Fanla Notify - 注册应用通知渠道")]
#[command(version)]
struct Cli {
    /// 配置文件路径 (默认: ~/.config/fanla-notify/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// 渠道注册表文件路径 (默认: ~/.config/fanla-notify/channels.json)
    #[arg(long, global = true)]
    registry: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 注册内置通知渠道（启动步骤）
    Register {
        /// 宿主平台 API level，低于 26 时跳过注册
        #[arg(long, conflicts_with = "capability")]
        api_level: Option<u32>,
        /// 直接指定平台能力 (legacy | channels)，代替 --api-level
        #[arg(long)]
        capability: Option<PlatformCapability>,
        /// 只显示将要创建的渠道，不修改注册表
        #[arg(long)]
        dry_run: bool,
    },
    /// 列出注册表中的渠道
    List {
        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
    /// 修改渠道重要程度（模拟用户在系统设置中的操作）
    SetImportance {
        /// 渠道 ID
        id: String,
        /// MIN | LOW | DEFAULT | HIGH | MAX，或平台级别 1-5
        importance: Importance,
    },
    /// 删除渠道（清理 ID 变更后遗留的旧渠道）
    Delete {
        /// 渠道 ID
        id: String,
    },
}

fn main() -> Result<()> {
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    // 例如: RUST_LOG=debug fanla-notify register
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fanla_notify=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Commands::Register { api_level, capability, dry_run } => {
            let config = base.with_overrides(api_level, cli.registry);
            let capability = capability.unwrap_or_else(|| config.capability());
            let registry = FileRegistry::open(config.registry_path());
            debug!(registry = %registry.path().display(), capability = %capability, "Starting channel registration");

            let channels = default_channels();
            let mut registrar = ChannelRegistrar::new(registry);

            if dry_run {
                match registrar.plan(&channels, capability) {
                    Ok(missing) if !capability.supports_channels() => {
                        debug!(count = missing.len(), "Legacy platform plan");
                        println!("[DRY-RUN] 平台不支持通知渠道 ({}), 将跳过注册", capability);
                    }
                    Ok(missing) => {
                        println!("[DRY-RUN] 将创建 {} 个渠道:", missing.len());
                        for channel in missing {
                            println!("  {} | {} | {}", channel.id, channel.display_name, channel.importance);
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Channel registration plan failed");
                        eprintln!("错误: {}", e);
                        std::process::exit(1);
                    }
                }
                return Ok(());
            }

            match registrar.register_channels(&channels, capability) {
                Ok(RegistrationResult::Skipped) => {
                    println!("平台不支持通知渠道 ({}), 已跳过注册", capability);
                }
                Ok(RegistrationResult::Registered(count)) => {
                    info!(created = count, total = channels.len(), "Channel registration completed");
                    println!("已创建 {} 个通知渠道 (共 {} 个)", count, channels.len());
                }
                Err(e) => {
                    error!(error = %e, "Channel registration failed");
                    eprintln!("错误: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::List { json } => {
            let config = base.with_overrides(None, cli.registry);
            let registry = FileRegistry::open(config.registry_path());
            let channels = registry.list()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&channels)?);
            } else if channels.is_empty() {
                println!("注册表中没有渠道");
            } else {
                println!("共 {} 个渠道:\n", channels.len());
                for channel in channels {
                    let def = &channel.definition;
                    println!(
                        "  {} | {} | {} ({}) | 指示灯: {} | 振动: {} | 创建于: {}",
                        def.id,
                        def.display_name,
                        def.importance,
                        def.importance.as_level(),
                        def.lights_enabled,
                        def.vibration_enabled,
                        channel.created_at.format("%Y-%m-%d %H:%M:%S"),
                    );
                }
            }
        }
        Commands::SetImportance { id, importance } => {
            let config = base.with_overrides(None, cli.registry);
            let mut registry = FileRegistry::open(config.registry_path());
            if registry.update_importance(&id, importance)? {
                info!(channel_id = %id, importance = %importance, "Channel importance updated");
                println!("已更新渠道 {} 的重要程度为 {}", id, importance);
            } else {
                eprintln!("渠道不存在: {}", id);
                std::process::exit(1);
            }
        }
        Commands::Delete { id } => {
            let config = base.with_overrides(None, cli.registry);
            let mut registry = FileRegistry::open(config.registry_path());
            if registry.delete(&id)? {
                info!(channel_id = %id, "Channel deleted");
                println!("已删除渠道 {}", id);
            } else {
                eprintln!("渠道不存在: {}", id);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_capability_flag() {
        let cli = Cli::try_parse_from(["fanla-notify", "register", "--capability", "legacy"]).unwrap();
        match cli.command {
            Commands::Register { capability, api_level, .. } => {
                assert_eq!(capability, Some(PlatformCapability::Legacy));
                assert_eq!(api_level, None);
            }
            _ => panic!("expected register"),
        }
    }

    #[test]
    fn test_register_capability_conflicts_with_api_level() {
        let result = Cli::try_parse_from([
            "fanla-notify", "register", "--capability", "channels", "--api-level", "24",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_set_importance_accepts_numeric_level() {
        let cli = Cli::try_parse_from(["fanla-notify", "set-importance", "fanla_team_notifications", "2"]).unwrap();
        match cli.command {
            Commands::SetImportance { id, importance } => {
                assert_eq!(id, "fanla_team_notifications");
                assert_eq!(importance, Importance::Low);
            }
            _ => panic!("expected set-importance"),
        }
    }
}
