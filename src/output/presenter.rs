use std::io::{self, Write};

use serde::Serialize;

use super::config::{OutputConfig, OutputFormat};
use super::types::{Envelope, Meta};

/// Human rendering of a result; JSON mode serializes the value instead.
pub trait TextView {
    fn render_text(&self, w: &mut dyn Write) -> io::Result<()>;
}

pub trait Presenter: Send + Sync {
    fn emit(&self, env: &Envelope, view: &dyn TextView, w: &mut dyn Write) -> io::Result<()>;
}

pub struct JsonPresenter { pub pretty: bool }
impl Presenter for JsonPresenter {
    fn emit(&self, env: &Envelope, _view: &dyn TextView, w: &mut dyn Write) -> io::Result<()> {
        if self.pretty { serde_json::to_writer_pretty(&mut *w, env).map_err(to_io)? } else { serde_json::to_writer(&mut *w, env).map_err(to_io)? }
        writeln!(w)
    }
}

pub struct TextPresenter { pub pretty: bool }
impl Presenter for TextPresenter {
    fn emit(&self, env: &Envelope, view: &dyn TextView, w: &mut dyn Write) -> io::Result<()> {
        view.render_text(w)?;
        if self.pretty {
            if let Some(meta) = &env.meta {
                if let Some(ms) = meta.duration_ms { writeln!(w, "({} in {} ms)", env.op, ms)?; }
            }
        }
        Ok(())
    }
}

pub struct Emitter {
    presenter: Box<dyn Presenter>,
}

impl Emitter {
    pub fn from_config(cfg: OutputConfig) -> Self {
        let presenter: Box<dyn Presenter> = match cfg.format {
            OutputFormat::Json => Box::new(JsonPresenter { pretty: cfg.pretty }),
            OutputFormat::Text => Box::new(TextPresenter { pretty: cfg.pretty }),
        };
        Emitter { presenter }
    }

    pub fn emit<T: Serialize + TextView>(&self, op: &'static str, result: &T, meta: Option<Meta>) -> anyhow::Result<()> {
        let env = Envelope::result(op, result, meta)?;
        let mut out = io::stdout().lock();
        self.presenter.emit(&env, result, &mut out)?;
        out.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn emit_to<T: Serialize + TextView>(&self, op: &'static str, result: &T, w: &mut dyn Write) -> anyhow::Result<()> {
        let env = Envelope::result(op, result, None)?;
        self.presenter.emit(&env, result, w)?;
        Ok(())
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }
