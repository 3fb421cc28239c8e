// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Instruction template sent with every patch

/// Section headings the model is asked to produce, in order
pub const SECTIONS: [&str; 4] = [
    "Tasks Performed",
    "Learnings",
    "Task Summary",
    "Learning Summary",
];

const INSTRUCTIONS: &str = "\
You are an expert assistant for analysing code and Git commits. Your task is to \
analyse the following Git patch (diff) and extract *only* two things: the concrete \
tasks that were carried out, and any learning, discovery or difficulty encountered \
while implementing those changes.

Based *solely* on the content of the patch, answer concisely, in the first person, \
using the structure below. Do not add introductions, conclusions or any other text \
outside that structure.

Strict response format:

**Tasks Performed:**
- [Short description of task 1 based on the diff]
- [Short description of task 2 based on the diff]
- ...

**Learnings:**
- [Short description of learning 1, if it can be inferred from the diff or comments]
- [Short description of difficulty or discovery 2, if it can be inferred]
- ...

**Task Summary:**
[A very short summary (2-3 lines at most) of the kind of work done in this commit.]

**Learning Summary:**
[A very short summary (2-3 lines at most) of the key learnings, discoveries or \
difficulties, if they can be inferred.]

If a section (especially Learnings) cannot clearly be inferred from the patch, leave \
it empty or write \"No direct learnings can be inferred from the patch\". Do not invent \
information. If there are no clear tasks, say so as well.

Here is the patch:";

/// Build the full prompt for one patch
///
/// The patch is embedded verbatim inside a fenced `diff` block.
#[must_use]
pub fn build_prompt(patch: &str) -> String {
    let fence = fence_for(patch);
    let mut prompt = String::with_capacity(INSTRUCTIONS.len() + patch.len() + 32);
    prompt.push_str(INSTRUCTIONS);
    prompt.push('\n');
    prompt.push_str(&fence);
    prompt.push_str("diff\n");
    prompt.push_str(patch);
    if !patch.ends_with('\n') {
        prompt.push('\n');
    }
    prompt.push_str(&fence);
    prompt
}

/// A backtick fence longer than any backtick run inside `text`
fn fence_for(text: &str) -> String {
    let longest = text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}
