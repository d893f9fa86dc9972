#[cfg(test)]
pub const POST_DATA: &str = r#"---
title: Using Vim with VS Code
date: 2021-01-01
description: How I kept my muscle memory when switching editors
tags: [vim, vscode]
keywords: vim, editor
image: vim.png
---

I have been using Vim keybindings for years.

## Installing the extension

Search for `vscodevim` in the marketplace.
"#;

#[cfg(test)]
pub const POST_DATA_MDX: &str = r#"---
date: 2022-01-15
meta:
  title: Getting started with tmux
  description: Sessions, windows and panes
---

import {Callout} from '~/components/Callout';

<Callout>tmux keeps your sessions alive.</Callout>
"#;
