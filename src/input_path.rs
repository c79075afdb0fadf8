use dialoguer::Input;
use std::env;
use std::path::PathBuf;

/// 获取 IIS 日志文件夹路径，优先命令行参数，否则交互输入
pub fn get_iislog_dir(default_dir: &str) -> PathBuf {
    // 优先命令行参数
    let mut args = env::args().skip(1);
    if let Some(path) = args.next() {
        return PathBuf::from(path);
    }
    // 交互输入，默认值来自配置
    let input: String = Input::new()
        .with_prompt("请输入 IIS 日志文件夹路径")
        .default(default_dir.to_string())
        .interact_text()
        .unwrap();
    PathBuf::from(input.trim())
}
