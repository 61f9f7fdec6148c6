//! Replay of proofs.

use super::{Binder, Virtuals};
use crate::decl::{Decl, ProofStep, Rule, TextEdit, Thm};
use crate::kernel::{self, DiffMap, Subst};
use crate::{Suggestion, TermOp};
use follow_parse::{ErrorKind, OpNode, Param, Range, Tok, TokenKind};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Parameters and diff relation of the theorem being proved.
struct Block<'r> {
    params: &'r [Param],
    names: BTreeSet<String>,
    diffs: &'r DiffMap,
}

impl<'r> Block<'r> {
    fn new(rule: &'r Rule) -> Self {
        let names = rule.params.iter().map(|p| p.name.text.clone()).collect();
        Self {
            params: &rule.params,
            names,
            diffs: &rule.diffs,
        }
    }

    fn violations(&self, diffs: &DiffMap) -> Vec<(String, String)> {
        kernel::violations(diffs, self.diffs, &self.names)
    }
}

fn comment(head: &Tok, targets: &[Arc<TermOp>]) -> String {
    if targets.is_empty() {
        return format!("{} => Q.E.D.", head);
    }
    let targets: Vec<_> = targets.iter().map(|t| format!("|- {}", t.text)).collect();
    format!("{} => {}", head, targets.join("; "))
}

/// Return true if the range lies within `outer`.
fn within(range: &Range, outer: &Range) -> bool {
    outer.start.cmp_lc(&range.start).is_le() && range.end.cmp_lc(&outer.end).is_le()
}

impl<'a> Binder<'a> {
    /// Elaborate a proof step.
    ///
    /// Return `None` if the step does not refer to an axiom or theorem.
    fn step(&mut self, op: &OpNode, block: &Block, virts: &mut Virtuals) -> Option<ProofStep> {
        let head = &op.head;
        let (kind, rule) = match self.get(&head.text) {
            Some(Decl::Axiom(rule)) => (TokenKind::AxiomName, rule.clone()),
            Some(Decl::Thm(thm)) => (TokenKind::ThmName, thm.rule.clone()),
            _ => {
                self.err(ErrorKind::AxiomThmDefMissing, head);
                self.set_kind(head, TokenKind::Unresolved);
                return None;
            }
        };
        self.check_arity(head, rule.params.len(), op.children.len());
        self.set_kind(head, kind);

        let end = Range::empty(head.range.end);
        let children: Vec<_> = rule
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| match op.children.get(i) {
                Some(c) => self.recover(c, block.params, p, virts),
                None => virts.fresh(head, end, p),
            })
            .collect();
        let uses_virtual = children.iter().any(|c| c.has_virtual());

        let sub: Subst = rule
            .params
            .iter()
            .map(|p| p.name.text.clone())
            .zip(children.iter().cloned())
            .collect();
        let targets = rule.targets.iter().map(|t| kernel::subst(t, &sub)).collect();
        let assumptions = rule.assumptions.iter().map(|a| kernel::subst(a, &sub)).collect();
        let diffs = kernel::instantiate_diffs(&rule.diff_groups, &sub);
        let diff_errors = block.violations(&diffs);
        for _ in &diff_errors {
            self.err(ErrorKind::ProofDiffError, head)
        }

        log::debug!("Apply {} to {} arguments", head, children.len());
        Some(ProofStep {
            head: head.clone(),
            children,
            range: op.range,
            rule,
            targets,
            assumptions,
            diffs,
            uses_virtual,
            diff_errors,
            edits: Vec::new(),
        })
    }

    /// Axioms and theorems whose name starts with the given name.
    fn name_suggestions(&self, head: &Tok) -> Vec<Suggestion> {
        let local = self.symbols.search(&head.text);
        let found = local.chain(self.deps.search(&head.text));
        found
            .take(self.search_limit)
            .map(|decl| Suggestion {
                range: head.range,
                text: decl.name().text.clone(),
                doc: format!("{:#}", decl),
                edits: Vec::new(),
            })
            .collect()
    }

    /// Elaborate and replay the proof of a theorem.
    pub(super) fn prove(&mut self, rule: Arc<Rule>, proof: &[OpNode]) -> Thm {
        let block = Block::new(&rule);
        let mut virts = Virtuals::new();
        let mut steps = Vec::new();
        let mut name_suggestions = Vec::new();
        for op in proof {
            match self.step(op, &block, &mut virts) {
                Some(step) => steps.push(step),
                None => name_suggestions.extend(self.name_suggestions(&op.head)),
            }
        }

        let assumed: BTreeSet<String> = rule.assumptions.iter().map(|a| a.key.clone()).collect();
        let mut current = rule.targets.clone();
        let mut trace = Vec::new();
        let mut suggestions = Vec::new();
        for step in &steps {
            match kernel::next_targets(&current, &step.targets, &step.assumptions, &assumed) {
                Some(next) => {
                    self.set_comment(&step.head, comment(&step.head, &next));
                    current = next;
                    suggestions.push(Vec::new());
                }
                None => {
                    self.err(ErrorKind::ProofOpUseless, &step.head);
                    let subs = kernel::candidates(
                        &current,
                        &step.targets,
                        &step.assumptions,
                        &rule.assumptions,
                    );
                    let alts = subs
                        .iter()
                        .filter_map(|sub| materialize(step, sub, &block, &virts))
                        .collect();
                    suggestions.push(alts);
                }
            }
            trace.push(current.clone());
        }

        let valid = trace.last().map_or(rule.targets.is_empty(), |t| t.is_empty());
        log::debug!("Theorem {} valid: {}", rule.name, valid);
        Thm {
            rule: rule.clone(),
            proof: steps,
            trace,
            valid,
            suggestions,
            name_suggestions,
        }
    }
}

/// Apply a candidate substitution to a proof step.
///
/// Return `None` if this changes neither the arguments of the step
/// nor any metavariable written earlier in the proof.
fn materialize(step: &ProofStep, sub: &Subst, block: &Block, virts: &Virtuals) -> Option<ProofStep> {
    let children: Vec<_> = step.children.iter().map(|c| kernel::subst(c, sub)).collect();
    let targets = step.targets.iter().map(|t| kernel::subst(t, sub)).collect();
    let assumptions = step.assumptions.iter().map(|a| kernel::subst(a, sub)).collect();
    let diffs = kernel::reinstantiate_diffs(&step.diffs, sub);
    let diff_errors = block.violations(&diffs);

    let mut edits = Vec::new();
    for v in virts.iter() {
        if v.range.is_empty() || v.range.end.line >= step.range.start.line {
            continue;
        }
        let new = match sub.get(&v.key) {
            Some(new) if new.key != v.key => new,
            _ => continue,
        };
        let edit = |range| TextEdit {
            range,
            new_text: new.key.clone(),
            old_text: v.key.clone(),
            new_term_text: new.text.clone(),
        };
        edits.push(edit(v.range));
        let uses = virts.uses(&v.key).iter();
        edits.extend(uses.filter(|r| !within(r, &step.range)).map(|r| edit(*r)));
    }

    let changed = step
        .children
        .iter()
        .zip(children.iter())
        .any(|(c, c2)| c.key != c2.key);
    if edits.is_empty() && !changed {
        return None;
    }
    Some(ProofStep {
        uses_virtual: children.iter().any(|c| c.has_virtual()),
        children,
        targets,
        assumptions,
        diffs,
        diff_errors,
        edits,
        ..step.clone()
    })
}
