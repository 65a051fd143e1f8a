//! Font generation through an external program
//!
//! The program is told where to write through argument placeholders and
//! is expected to leave `<name>.<ext>` files behind in that directory:
//!
//! | Placeholder      | Replaced with |
//! |------------------|---------------|
//! | `{output}`       | scratch output directory |
//! | `{name}`         | font name |
//! | `{formats}`      | comma-separated extensions |
//! | `{template}`     | stylesheet extension |
//! | `{fontPath}`     | `cssTemplateFontPath`, the URL prefix for fonts in the stylesheet |
//! | `{startUnicode}` | first code point, as `0x`-prefixed hex |
//! | `{codepoints}`   | JSON file mapping each glyph name to its code point |
//! | `{fontsDir}`     | final fonts directory |
//! | `{stylesDir}`    | final stylesheet directory |
//! | `{files}`        | one argument per input icon (whole argument only) |
//!
//! A program that numbers glyphs itself should read `{codepoints}`, or the
//! fallback stylesheet will not line up with its font.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use webfont_core::{
    cancel::CancellationToken,
    error::{GenerationError, Result, WebfontError},
    traits::FontGenerator,
    types::{GenerationRequest, GenerationResult},
};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs an external font generator for every regeneration
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments with every placeholder substituted
    ///
    /// `scratch` is the job directory; the program writes into
    /// `<scratch>/out` and finds the code point map at
    /// `<scratch>/codepoints.json`.
    pub fn expand_args(&self, request: &GenerationRequest, scratch: &Path) -> Vec<String> {
        let formats = request
            .formats
            .iter()
            .map(|format| format.extension())
            .collect::<Vec<_>>()
            .join(",");
        let output = output_dir(scratch).display().to_string();
        let codepoints = codepoints_path(scratch).display().to_string();
        let start_unicode = format!("{:#x}", request.start_unicode);
        let fonts_dir = request.dest.fonts_dir.display().to_string();
        let styles_dir = request.dest.styles_dir.display().to_string();

        let mut expanded = Vec::with_capacity(self.args.len() + request.files.len());
        for arg in &self.args {
            if arg == "{files}" {
                expanded.extend(request.files.iter().map(|f| f.display().to_string()));
                continue;
            }
            expanded.push(
                arg.replace("{output}", &output)
                    .replace("{name}", &request.font_name)
                    .replace("{formats}", &formats)
                    .replace("{template}", request.template.extension())
                    .replace("{fontPath}", &request.css_template_font_path)
                    .replace("{startUnicode}", &start_unicode)
                    .replace("{codepoints}", &codepoints)
                    .replace("{fontsDir}", &fonts_dir)
                    .replace("{stylesDir}", &styles_dir),
            );
        }
        expanded
    }

    fn wait(
        &self,
        child: &mut std::process::Child,
        cancel: &CancellationToken,
    ) -> Result<ExitStatus> {
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if cancel.is_cancelled() {
                log::warn!("cancelling `{}`", self.program);
                // The child may have exited between the two checks
                let _ = child.kill();
                child.wait()?;
                return Err(WebfontError::Cancelled);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl FontGenerator for CommandGenerator {
    fn name(&self) -> &'static str {
        "command"
    }

    fn generate(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult> {
        let scratch = tempfile::tempdir()?;
        let output = output_dir(scratch.path());
        fs::create_dir(&output)?;
        write_codepoints(request, &codepoints_path(scratch.path()))?;
        let stderr_path = scratch.path().join("stderr.log");
        let stderr = File::create(&stderr_path)?;

        let args = self.expand_args(request, scratch.path());
        log::debug!("running {} {}", self.program, args.join(" "));

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::from(stderr))
            .spawn()
            .map_err(|source| GenerationError::Spawn {
                command: self.program.clone(),
                source,
            })?;

        let status = self.wait(&mut child, cancel)?;
        if !status.success() {
            let stderr = fs::read_to_string(&stderr_path).unwrap_or_default();
            return Err(GenerationError::CommandFailed {
                command: self.program.clone(),
                status: status.to_string(),
                stderr: stderr.trim().to_string(),
            }
            .into());
        }

        let mut result = GenerationResult::new();
        for &format in &request.formats {
            let path = output.join(format!("{}.{}", request.font_name, format.extension()));
            match fs::read(&path) {
                Ok(data) => result.insert_font(format, data),
                Err(e) => log::debug!("{} not produced: {e}", path.display()),
            }
        }

        let stylesheet = output.join(format!(
            "{}.{}",
            request.font_name,
            request.template.extension()
        ));
        if let Ok(css) = fs::read_to_string(&stylesheet) {
            result.stylesheet = Some(css);
        }

        Ok(result)
    }
}

fn output_dir(scratch: &Path) -> PathBuf {
    scratch.join("out")
}

fn codepoints_path(scratch: &Path) -> PathBuf {
    scratch.join("codepoints.json")
}

/// `{ "<glyph name>": <code point>, ... }`
fn write_codepoints(request: &GenerationRequest, path: &Path) -> Result<()> {
    let map: BTreeMap<&str, u32> = request
        .glyphs
        .iter()
        .map(|glyph| (glyph.name.as_str(), u32::from(glyph.codepoint)))
        .collect();
    let json = serde_json::to_vec(&map).map_err(std::io::Error::from)?;
    fs::write(path, json)?;
    Ok(())
}
