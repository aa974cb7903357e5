use super::{DocMeta, DocProbe, ImageInfo, ProbeDiag, ToolDiag};
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Inspection collaborators backed by the poppler CLI tools
/// (pdfinfo / pdftotext / pdfimages), each invocation time-boxed.
pub struct PopplerProbe {
    pdfinfo_bin: String,
    pdftotext_bin: String,
    pdfimages_bin: String,
    timeout: Duration,
}

impl PopplerProbe {
    pub fn new(cfg: &Config) -> Self {
        Self {
            pdfinfo_bin: cfg.probe.pdfinfo_bin.clone(),
            pdftotext_bin: cfg.probe.pdftotext_bin.clone(),
            pdfimages_bin: cfg.probe.pdfimages_bin.clone(),
            timeout: Duration::from_secs(cfg.probe.timeout_seconds.max(1)),
        }
    }

    fn run(&self, bin: &str, args: &[&str]) -> Result<Output> {
        debug!("probe run {} {:?} timeout={:?}", bin, args, self.timeout);
        let mut child = Command::new(bin)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("spawning {bin}"))?;

        wait_with_timeout(&mut child, self.timeout)
    }

    fn run_ok(&self, bin: &str, args: &[&str]) -> Result<Output> {
        let out = self.run(bin, args)?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(anyhow!("{bin} failed: {}", stderr.trim()));
        }
        Ok(out)
    }

    fn tool_diag(&self, name: &str, bin: &str) -> ToolDiag {
        // Poppler tools print "<tool> version X.Y.Z" on stderr for -v.
        match self.run(bin, &["-v"]) {
            Ok(out) => {
                let text = String::from_utf8_lossy(&out.stderr);
                let version = text
                    .lines()
                    .find(|l| l.contains("version"))
                    .map(|l| l.trim().to_string());
                ToolDiag {
                    name: name.to_string(),
                    bin: bin.to_string(),
                    ok: version.is_some(),
                    version,
                    error: None,
                }
            }
            Err(err) => ToolDiag {
                name: name.to_string(),
                bin: bin.to_string(),
                version: None,
                ok: false,
                error: Some(format!("{err:#}")),
            },
        }
    }
}

impl DocProbe for PopplerProbe {
    fn doctor(&self) -> Result<ProbeDiag> {
        let tools = vec![
            self.tool_diag("pdfinfo", &self.pdfinfo_bin),
            self.tool_diag("pdftotext", &self.pdftotext_bin),
            self.tool_diag("pdfimages", &self.pdfimages_bin),
        ];
        let ok = tools.iter().all(|t| t.ok);
        Ok(ProbeDiag { ok, tools })
    }

    fn metadata(&self, input: &Path) -> Result<DocMeta> {
        let file_bytes = std::fs::metadata(input)
            .with_context(|| format!("stat {}", input.display()))?
            .len();

        let input_str = input.display().to_string();
        let out = self.run_ok(&self.pdfinfo_bin, &[input_str.as_str()])?;
        let text = String::from_utf8_lossy(&out.stdout);

        let page_count = text
            .lines()
            .find_map(|l| l.strip_prefix("Pages:"))
            .and_then(|v| v.trim().parse::<u32>().ok())
            .ok_or_else(|| anyhow!("pdfinfo output has no page count"))?;

        Ok(DocMeta {
            file_bytes,
            page_count,
        })
    }

    fn extract_text(&self, input: &Path, sample_pages: u32) -> Result<String> {
        let last = sample_pages.max(1).to_string();
        let input_str = input.display().to_string();
        let out = self.run_ok(
            &self.pdftotext_bin,
            &["-f", "1", "-l", &last, "-q", input_str.as_str(), "-"],
        )?;
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }

    fn list_images(&self, input: &Path) -> Result<Vec<ImageInfo>> {
        let input_str = input.display().to_string();
        let out = self.run_ok(&self.pdfimages_bin, &["-list", input_str.as_str()])?;
        let text = String::from_utf8_lossy(&out.stdout);
        Ok(parse_image_list(&text))
    }
}

/// Parse `pdfimages -list` table output. Rows look like:
/// `   1     0 image    1477  1107  rgb     3   8  jpeg ...`
/// Column 3 is the object type, column 6 the declared color space.
fn parse_image_list(text: &str) -> Vec<ImageInfo> {
    text.lines()
        .skip_while(|l| !l.starts_with('-'))
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() < 6 || cols[2] != "image" {
                return None;
            }
            Some(ImageInfo {
                color_space: cols[5].to_string(),
            })
        })
        .collect()
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Output> {
    // Drain pipes while waiting so a chatty tool can't deadlock on a full
    // stdout/stderr buffer.
    let stdout_reader = child.stdout.take();
    let stderr_reader = child.stderr.take();

    let stdout_thread = std::thread::spawn(move || -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout_reader {
            out.read_to_end(&mut buf).with_context(|| "read stdout")?;
        }
        Ok(buf)
    });

    let stderr_thread = std::thread::spawn(move || -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        if let Some(mut err) = stderr_reader {
            err.read_to_end(&mut buf).with_context(|| "read stderr")?;
        }
        Ok(buf)
    });

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait().with_context(|| "try_wait")? {
            let stdout = stdout_thread
                .join()
                .map_err(|_| anyhow!("stdout reader thread panicked"))??;
            let stderr = stderr_thread
                .join()
                .map_err(|_| anyhow!("stderr reader thread panicked"))??;
            return Ok(Output {
                status,
                stdout,
                stderr,
            });
        }

        if start.elapsed() > timeout {
            warn!("probe process timed out after {:?}", timeout);
            let _ = child.kill();
            let _ = child.wait().with_context(|| "wait after kill")?;
            let _ = stdout_thread.join();
            let _ = stderr_thread.join();
            return Err(anyhow!("probe process exceeded timeout ({:?})", timeout));
        }

        std::thread::sleep(Duration::from_millis(50));
    }
}
