use super::is_available;
use crate::ui::{Color, Colorize, Panel};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

pub const DEFAULT_PROJECT_NAME: &str = "my-app";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stack {
    ReactVite,
    NodeExpress,
    NextJs,
    Flask,
    FastApi,
}

impl Stack {
    pub const ALL: [Stack; 5] = [
        Stack::ReactVite,
        Stack::NodeExpress,
        Stack::NextJs,
        Stack::Flask,
        Stack::FastApi,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Stack::ReactVite => "React (Vite)",
            Stack::NodeExpress => "Node.js (Express)",
            Stack::NextJs => "Next.js",
            Stack::Flask => "Flask (Python)",
            Stack::FastApi => "FastAPI (Python)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Language {
    TypeScript,
    JavaScript,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::TypeScript, Language::JavaScript];

    pub fn label(&self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::JavaScript => "JavaScript",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Run { program: String, args: Vec<String> },
    WriteFile { path: PathBuf, contents: String },
}

fn run(program: &str, args: &[&str]) -> Step {
    Step::Run {
        program: program.to_string(),
        args: args.iter().map(|a| a.to_string()).collect(),
    }
}

fn write(path: &str, contents: &str) -> Step {
    Step::WriteFile {
        path: PathBuf::from(path),
        contents: contents.to_string(),
    }
}

const EXPRESS_SERVER: &str = "const express = require('express');\n\
const app = express();\n\
app.listen(3000, () => console.log('Server running'));\n";

const FLASK_APP: &str = "from flask import Flask\n\
app = Flask(__name__)\n\
\n\
@app.route('/')\n\
def home():\n    return 'Hello Flask!'\n\
\n\
if __name__ == '__main__':\n    app.run(debug=True)\n";

const FASTAPI_APP: &str = "from fastapi import FastAPI\n\
app = FastAPI()\n\
\n\
@app.get('/')\n\
def read_root():\n    return {'message': 'Hello FastAPI!'}\n";

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPlan {
    pub stack: Stack,
    pub name: String,
    pub language: Language,
    pub init_git: bool,
}

impl ProjectPlan {
    /// Commands and files, in order, run inside the project directory.
    pub fn steps(&self) -> Vec<Step> {
        let mut steps = match self.stack {
            Stack::ReactVite => {
                let template = match self.language {
                    Language::TypeScript => "react-ts",
                    Language::JavaScript => "react",
                };
                vec![run("npm", &["create", "vite@latest", ".", "--", "--template", template])]
            }
            Stack::NodeExpress => vec![
                run("npm", &["init", "-y"]),
                write("server.js", EXPRESS_SERVER),
                run("npm", &["install", "express"]),
            ],
            Stack::NextJs => {
                let flag = match self.language {
                    Language::TypeScript => "--ts",
                    Language::JavaScript => "--js",
                };
                vec![run("npx", &["create-next-app@latest", ".", flag, "--use-npm"])]
            }
            Stack::Flask => vec![
                run("python3", &["-m", "venv", "venv"]),
                write("app.py", FLASK_APP),
            ],
            Stack::FastApi => vec![
                run("pip", &["install", "fastapi", "uvicorn"]),
                write("main.py", FASTAPI_APP),
            ],
        };

        if self.init_git {
            steps.push(run("git", &["init"]));
        }
        steps
    }

    pub fn next_steps(&self) -> Vec<String> {
        let launch = match self.stack {
            Stack::ReactVite | Stack::NextJs => "npm run dev",
            Stack::NodeExpress => "node server.js",
            Stack::Flask => "source venv/bin/activate && python app.py",
            Stack::FastApi => "uvicorn main:app --reload",
        };
        vec![format!("cd {}", self.name), launch.to_string()]
    }
}

/// Asks the scaffolding questions over any line-based input.
pub struct Wizard<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Wizard<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(anyhow!("Input closed before the project was configured"));
        }
        Ok(line.trim().to_string())
    }

    /// Numbered menu; re-asks until a listed number is entered.
    pub fn ask_choice(&mut self, title: &str, choices: &[&str]) -> Result<usize> {
        writeln!(self.output, "{}", title.cyan().bold())?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "{}. {}", (i + 1).to_string().yellow(), choice)?;
        }
        loop {
            write!(self.output, "Enter your choice: ")?;
            self.output.flush()?;
            match self.read_line()?.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(
                    self.output,
                    "{}",
                    "Invalid input. Please enter a valid number.".red()
                )?,
            }
        }
    }

    pub fn ask(&mut self, question: &str, default: &str) -> Result<String> {
        write!(self.output, "{} ({}): ", question, default)?;
        self.output.flush()?;
        let answer = self.read_line()?;
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer
        })
    }

    pub fn collect(&mut self) -> Result<ProjectPlan> {
        let labels: Vec<&str> = Stack::ALL.iter().map(|s| s.label()).collect();
        let stack = Stack::ALL[self.ask_choice("Choose your tech stack:", &labels)?];

        let name = loop {
            let name = self.ask("Project name", DEFAULT_PROJECT_NAME)?;
            if is_valid_name(&name) {
                break name;
            }
            writeln!(self.output, "{}", "Use a plain directory name.".red())?;
        };

        let labels: Vec<&str> = Language::ALL.iter().map(|l| l.label()).collect();
        let language = Language::ALL[self.ask_choice("Choose language:", &labels)?];

        let init_git = self
            .ask("Initialize git repository? (yes/no)", "yes")?
            .to_lowercase()
            .starts_with('y');

        Ok(ProjectPlan {
            stack,
            name,
            language,
            init_git,
        })
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

/// Creates `<parent>/<name>` and runs the plan inside it.
pub fn apply<W: Write>(plan: &ProjectPlan, parent: &Path, output: &mut W) -> Result<PathBuf> {
    let project_dir = parent.join(&plan.name);
    fs::create_dir_all(&project_dir)
        .with_context(|| format!("Failed to create {}", project_dir.display()))?;
    run_steps(&plan.steps(), &project_dir, output)?;
    Ok(project_dir)
}

/// Programs that are missing or fail are reported and skipped, so a
/// partial project is still left behind for the user to finish.
pub fn run_steps<W: Write>(steps: &[Step], project_dir: &Path, output: &mut W) -> Result<()> {
    for step in steps {
        match step {
            Step::WriteFile { path, contents } => {
                fs::write(project_dir.join(path), contents)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
            Step::Run { program, args } => {
                let command_line = format!("{} {}", program, args.join(" "));
                if !is_available(program) {
                    warn!(program = %program, "scaffold program not installed");
                    writeln!(
                        output,
                        "{}",
                        format!("Skipping `{}`: {} is not installed", command_line, program).yellow()
                    )?;
                    continue;
                }
                debug!(command = %command_line, "running scaffold step");
                let status = Command::new(program)
                    .args(args)
                    .current_dir(project_dir)
                    .status()
                    .with_context(|| format!("Failed to run {}", program))?;
                if !status.success() {
                    writeln!(
                        output,
                        "{}",
                        format!("`{}` exited with {}", command_line, status).red()
                    )?;
                }
            }
        }
    }
    Ok(())
}

/// Interactive `!create` flow on the terminal.
pub fn create_project() -> Result<PathBuf> {
    let mut stdout = io::stdout();
    writeln!(
        stdout,
        "{}",
        Panel::new(None, Color::Cyan).render("Welcome to the project generator!")
    )?;

    let stdin = io::stdin();
    let plan = Wizard::new(stdin.lock(), io::stdout()).collect()?;

    writeln!(stdout, "\n{}", "Creating your project...".yellow())?;
    let parent = std::env::current_dir()?;
    let project_dir = apply(&plan, &parent, &mut stdout)?;

    writeln!(stdout, "\n{} Project created successfully!", "✓".green())?;
    writeln!(stdout, "Project: {}", plan.name)?;
    writeln!(stdout, "Location: {}\n", project_dir.display())?;
    writeln!(stdout, "{}", "Next steps:".bold())?;
    for step in plan.next_steps() {
        writeln!(stdout, "   {}", step)?;
    }
    Ok(project_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn wizard(script: &str) -> Wizard<Cursor<Vec<u8>>, Vec<u8>> {
        Wizard::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_collect_with_defaults() {
        let plan = wizard("2\n\n1\n\n").collect().unwrap();
        assert_eq!(
            plan,
            ProjectPlan {
                stack: Stack::NodeExpress,
                name: DEFAULT_PROJECT_NAME.to_string(),
                language: Language::TypeScript,
                init_git: true,
            }
        );
    }

    #[test]
    fn test_invalid_choices_are_asked_again() {
        let mut wizard = wizard("0\nseven\n9\n4\napi/../x\nservice\n2\nno\n");
        let plan = wizard.collect().unwrap();

        assert_eq!(plan.stack, Stack::Flask);
        assert_eq!(plan.name, "service");
        assert_eq!(plan.language, Language::JavaScript);
        assert!(!plan.init_git);

        let transcript = String::from_utf8(wizard.output).unwrap();
        assert_eq!(transcript.matches("Invalid input").count(), 3);
    }

    #[test]
    fn test_closed_input_is_an_error() {
        assert!(wizard("1\n").collect().is_err());
    }

    #[test]
    fn test_react_template_follows_language() {
        let plan = ProjectPlan {
            stack: Stack::ReactVite,
            name: "web".to_string(),
            language: Language::JavaScript,
            init_git: true,
        };
        assert_eq!(
            plan.steps(),
            vec![
                run("npm", &["create", "vite@latest", ".", "--", "--template", "react"]),
                run("git", &["init"]),
            ]
        );
        assert_eq!(plan.next_steps(), vec!["cd web", "npm run dev"]);
    }

    #[test]
    fn test_run_steps_writes_files_and_skips_missing_programs() {
        let temp = tempdir().unwrap();
        let steps = vec![
            write("app.py", FLASK_APP),
            run("shellmate-no-such-tool", &["init"]),
        ];
        let mut output = Vec::new();

        run_steps(&steps, temp.path(), &mut output).unwrap();

        let app = fs::read_to_string(temp.path().join("app.py")).unwrap();
        assert!(app.contains("Hello Flask!"));
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("shellmate-no-such-tool is not installed"));
    }

    #[test]
    fn test_flask_plan() {
        let plan = ProjectPlan {
            stack: Stack::Flask,
            name: "api".to_string(),
            language: Language::TypeScript,
            init_git: false,
        };
        assert_eq!(
            plan.steps(),
            vec![run("python3", &["-m", "venv", "venv"]), write("app.py", FLASK_APP)]
        );
    }
}
