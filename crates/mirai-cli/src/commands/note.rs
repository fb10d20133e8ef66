//! Notebook subcommands.

use colored::Colorize;
use mirai_application::NotebookUseCase;

pub async fn add(notebook: &NotebookUseCase, title: &str, content: &str) {
    if notebook.add_note(title, content).await {
        println!("ノートにきろくしたよ！");
    } else {
        println!("タイトルとないようを、どちらも書いてね。");
    }
}

pub async fn list(notebook: &NotebookUseCase) {
    let notes = notebook.notes().await;
    if notes.is_empty() {
        println!("まだノートがないよ。");
        return;
    }
    println!("じぶんのノート（{}こ）", notes.len());
    for note in notes {
        println!("{}  {}", note.id.dimmed(), note.title.bold());
        println!("    {}", note.content);
    }
}

pub async fn remove(notebook: &NotebookUseCase, id: &str) {
    if notebook.delete_note(id).await {
        println!("ノートをけしたよ。");
    } else {
        println!("そのノートは見つからなかったよ。");
    }
}
