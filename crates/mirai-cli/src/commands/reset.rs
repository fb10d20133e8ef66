//! Confirmed project reset.

use mirai_application::NotebookUseCase;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

pub async fn run(notebook: &NotebookUseCase) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let answer = match editor.readline("これまでのしらべ学習のきろくをけして、新しく始める？ [y/N] ") {
        Ok(answer) => answer,
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => String::new(),
        Err(err) => return Err(err.into()),
    };

    if answer.trim().eq_ignore_ascii_case("y") {
        let project = notebook.reset().await;
        println!("{}", project.chat_history[0].content);
    } else {
        println!("そのままにしておくね。");
    }
    Ok(())
}
