use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "piecework")]
#[command(about = "作業実績（出来高）入力フォーム・クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 接続先サーバURL（設定ファイルより優先）
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 参照データ（作業者・行程・単価・品番）を取得して表示
    Init,

    /// 品番コードから品名候補を表示（完全一致）
    Lookup {
        /// 品番コード
        #[arg(required = true)]
        code: String,
    },

    /// 品番コードの前方一致検索（3文字以上）
    Codes {
        /// 品番コード（先頭部分）
        #[arg(required = true)]
        code: String,
    },

    /// 対話的にフォームを入力して送信
    Entry,

    /// 引数で指定したフォームを送信
    Submit {
        /// PersonID（省略時は前回の値）
        #[arg(short, long)]
        personid: Option<String>,

        /// 品番コード
        #[arg(short = 'c', long)]
        workcd: Option<String>,

        /// 品名候補の番号（1始まり、省略時は先頭）
        #[arg(long)]
        select: Option<usize>,

        /// 行程名
        #[arg(long)]
        process: Option<String>,

        /// 数量（個、分）
        #[arg(short, long, default_value = "0")]
        output: String,

        /// 作業日 YYYY-MM-DD（省略時は前回の値）
        #[arg(short = 'd', long)]
        workday: Option<String>,
    },

    /// 保存済みの前回入力を表示
    Saved,

    /// 一覧ページのURLを表示
    Records,

    /// 設定を表示/編集
    Config {
        /// 接続先サーバURLを設定
        #[arg(long)]
        set_server: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
