//! Theme previews over fixed sample programs.

use codesh_theme::ThemeDocument;

use crate::html::escape_html;
use crate::language::canonical_language;
use crate::{Decorations, Highlighter, ThemeSelection};

const PHP_SAMPLE: &str = r#"<?php
namespace Shop\Billing;

final class InvoiceBuilder
{
    private const TAX_RATE = 0.21;
    private array $lines = [];

    public function add(string $item, float $price, int $qty = 1): self
    {
        // Ignore empty lines
        if ($qty <= 0) {
            return $this;
        }
        $this->lines[] = ['item' => $item, 'total' => $price * $qty];
        return $this;
    }

    public function total(): float
    {
        $sum = array_sum(array_column($this->lines, 'total'));
        return round($sum * (1 + self::TAX_RATE), 2);
    }
}"#;

const JAVASCRIPT_SAMPLE: &str = r#"// Debounced search box
import { fetchJson } from "./http.js";

export class SearchBox {
  #timer = null;

  constructor(input, delay = 250) {
    this.input = input;
    this.delay = delay;
    input.addEventListener("input", () => this.schedule());
  }

  schedule() {
    clearTimeout(this.#timer);
    this.#timer = setTimeout(() => this.run(), this.delay);
  }

  async run() {
    const query = this.input.value.trim();
    if (query.length < 2) return [];
    return fetchJson(`/api/search?q=${encodeURIComponent(query)}`);
  }
}"#;

const PYTHON_SAMPLE: &str = r#""""Rolling statistics over a stream."""
from collections import deque
from typing import Iterable


class Window:
    def __init__(self, size: int = 10) -> None:
        self.size = size
        self._items: deque[float] = deque(maxlen=size)

    def push(self, value: float) -> float:
        # Returns the running mean
        self._items.append(value)
        return sum(self._items) / len(self._items)


def smooth(values: Iterable[float], size: int = 3) -> list[float]:
    window = Window(size)
    return [round(window.push(v), 2) for v in values if v is not None]"#;

const CSS_SAMPLE: &str = r#"/* Card component */
:root {
  --card-radius: 8px;
  --card-shadow: 0 1px 3px rgba(0, 0, 0, 0.12);
}

.card {
  display: flex;
  padding: 1.5rem 2rem;
  border-radius: var(--card-radius);
  box-shadow: var(--card-shadow);
}

.card > .title:hover {
  color: #3b82f6;
  font-weight: 600;
}

@media (max-width: 640px) {
  .card { flex-direction: column; }
}"#;

const HTML_SAMPLE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Dashboard</title>
  <link rel="stylesheet" href="/css/app.css">
</head>
<body>
  <!-- Main navigation -->
  <nav class="menu" aria-label="Primary">
    <a href="/" class="active">Home</a>
    <a href="/reports">Reports</a>
  </nav>
  <main id="content">
    <h1>Welcome back</h1>
    <button type="button" disabled>Refresh</button>
  </main>
</body>
</html>"#;

const RUST_SAMPLE: &str = r#"use std::collections::HashMap;

/// Counts words in a text.
pub struct WordCounter {
    counts: HashMap<String, usize>,
}

impl WordCounter {
    pub fn new() -> Self {
        Self { counts: HashMap::new() }
    }

    pub fn feed(&mut self, text: &str) {
        for word in text.split_whitespace() {
            *self.counts.entry(word.to_lowercase()).or_insert(0) += 1;
        }
    }

    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut pairs: Vec<_> = self.counts.iter().map(|(w, c)| (w.as_str(), *c)).collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs.truncate(n);
        pairs
    }
}"#;

const JSON_SAMPLE: &str = r#"{
  "name": "dashboard",
  "version": "2.4.1",
  "private": true,
  "scripts": {
    "build": "vite build",
    "test": "vitest run"
  },
  "retries": 3,
  "timeout": null
}"#;

const SAMPLES: &[(&str, &str)] = &[
    ("php", PHP_SAMPLE),
    ("javascript", JAVASCRIPT_SAMPLE),
    ("python", PYTHON_SAMPLE),
    ("css", CSS_SAMPLE),
    ("html", HTML_SAMPLE),
    ("rust", RUST_SAMPLE),
    ("json", JSON_SAMPLE),
];

/// Languages with a preview sample.
pub fn preview_languages() -> impl Iterator<Item = &'static str> {
    SAMPLES.iter().map(|(lang, _)| *lang)
}

/// Sample program for `language`. Unknown languages get the PHP sample.
pub fn preview_sample(language: &str) -> (&'static str, &'static str) {
    let lang = canonical_language(language).unwrap_or("php");
    SAMPLES
        .iter()
        .find(|(name, _)| *name == lang)
        .copied()
        .unwrap_or(("php", PHP_SAMPLE))
}

/// Render the sample for `language` with `theme`.
///
/// The theme need not be stored, so unsaved edits can be previewed. If
/// highlighting fails the escaped sample is returned in a bare `<pre>`.
pub fn render_preview(highlighter: &dyn Highlighter, theme: &ThemeDocument, language: &str) -> String {
    let (lang, code) = preview_sample(language);
    let selection = ThemeSelection::Single(theme.clone());

    match highlighter.highlight(code, lang, &selection, &Decorations::default()) {
        Ok(html) => html,
        Err(e) => {
            codesh_logger::warn(format!("Preview of '{}' failed: {}", theme.name, e));
            format!("<pre><code>{}</code></pre>", escape_html(code))
        }
    }
}
