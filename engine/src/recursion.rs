//! Deferred references for recursive grammars
//!
//! A rule such as `tag = opening_tag, many(tag | text), closing_tag` cannot
//! be built eagerly: constructing `tag` would require `tag`. Instead a rule is
//! first *declared* in a [`Grammar`], which hands out a [`Rule`] handle.
//! [`recur`] turns that handle into a parser that looks the rule up only when
//! it is invoked, so any rule may mention itself or a rule defined later.
//! Once every rule is defined, [`Grammar::entry`] checks that nothing was
//! left undefined and returns the root parser.
//!
//! The registry is written during construction only and is read-only once
//! parsing starts. References held inside rule definitions are weak; the
//! parser returned by [`Grammar::entry`] owns the rules.
use crate::error::GrammarError;
use crate::input::{Input, Position};
use crate::parser::Parser;
use crate::result::ParseResult;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use tracing::{debug, trace};

static NEXT_GRAMMAR_ID: AtomicUsize = AtomicUsize::new(0);

fn next_grammar_id() -> usize {
    NEXT_GRAMMAR_ID.fetch_add(1, Ordering::Relaxed)
}

/// The assignable cell behind a rule
struct RuleCell<T> {
    name: Arc<str>,
    grammar: usize,
    target: OnceLock<Parser<T>>,
}

impl<T: 'static> RuleCell<T> {
    fn new(name: Arc<str>, grammar: usize) -> Self {
        RuleCell {
            name,
            grammar,
            target: OnceLock::new(),
        }
    }

    /// Delegate to the rule's definition.
    ///
    /// # Panics
    ///
    /// Panics if the rule has not been defined. That is a defect in the
    /// grammar, not a property of the input.
    fn parse_at(&self, input: &Input<'_>, pos: Position) -> ParseResult<T> {
        match self.target.get() {
            Some(target) => target.parse_at(input, pos),
            None => panic!("{}", GrammarError::UndefinedRule(self.name.to_string())),
        }
    }
}

/// Type-erased view of a rule cell so one grammar can hold rules of
/// different value types.
trait Slot: Send + Sync {
    fn name(&self) -> &str;
    fn is_defined(&self) -> bool;
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: 'static> Slot for RuleCell<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_defined(&self) -> bool {
        self.target.get().is_some()
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Handle to a declared rule
pub struct Rule<T> {
    name: Arc<str>,
    cell: Weak<RuleCell<T>>,
}

impl<T> Clone for Rule<T> {
    fn clone(&self) -> Self {
        Rule {
            name: Arc::clone(&self.name),
            cell: Weak::clone(&self.cell),
        }
    }
}

impl<T> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rule").field(&self.name).finish()
    }
}

impl<T: 'static> Rule<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same as [`recur`]
    pub fn parser(&self) -> Parser<T> {
        recur(self)
    }
}

/// A parser that resolves `rule` each time it runs.
///
/// Building it never touches the rule's definition, so it can appear inside
/// that very definition.
///
/// # Panics
///
/// The returned parser panics when invoked if the rule has no definition yet,
/// or if its grammar was dropped without producing an entry parser.
pub fn recur<T: 'static>(rule: &Rule<T>) -> Parser<T> {
    let name = Arc::clone(&rule.name);
    let cell = Weak::clone(&rule.cell);

    Parser::new(format!("recur({})", name), move |input, pos| {
        trace!(rule = %name, pos, "resolving recursive rule");
        match cell.upgrade() {
            Some(cell) => cell.parse_at(input, pos),
            None => panic!("rule `{}` outlived the grammar that declared it", name),
        }
    })
}

/// Registry of the named rules of one grammar.
pub struct Grammar {
    id: usize,
    rules: Vec<Arc<dyn Slot>>,
    index: HashMap<Arc<str>, usize>,
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("id", &self.id)
            .field("rules", &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar {
    pub fn new() -> Self {
        Grammar {
            id: next_grammar_id(),
            rules: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Reserve a rule name. The definition comes later through [`Grammar::define`].
    pub fn declare<T: 'static>(&mut self, name: &str) -> Result<Rule<T>, GrammarError> {
        if self.index.contains_key(name) {
            return Err(GrammarError::DuplicateRule(name.to_string()));
        }

        let name: Arc<str> = Arc::from(name);
        let cell = Arc::new(RuleCell::<T>::new(Arc::clone(&name), self.id));
        let rule = Rule {
            name: Arc::clone(&name),
            cell: Arc::downgrade(&cell),
        };

        debug!(grammar = self.id, rule = %name, "declared rule");
        self.index.insert(name, self.rules.len());
        self.rules.push(cell);
        Ok(rule)
    }

    /// Assign the parser a declared rule stands for. A rule is defined once.
    pub fn define<T: 'static>(&mut self, rule: &Rule<T>, parser: Parser<T>) -> Result<(), GrammarError> {
        let cell = self.owned_cell(rule)?;
        cell.target
            .set(parser)
            .map_err(|_| GrammarError::AlreadyDefined(rule.name.to_string()))?;

        debug!(grammar = self.id, rule = %rule.name, "defined rule");
        Ok(())
    }

    /// Look a rule up by name.
    pub fn rule<T: 'static>(&self, name: &str) -> Result<Rule<T>, GrammarError> {
        let slot = self
            .index
            .get(name)
            .map(|&i| Arc::clone(&self.rules[i]))
            .ok_or_else(|| GrammarError::UnknownRule(name.to_string()))?;

        let cell = slot
            .into_any()
            .downcast::<RuleCell<T>>()
            .map_err(|_| GrammarError::RuleTypeMismatch(name.to_string()))?;

        Ok(Rule {
            name: Arc::clone(&cell.name),
            cell: Arc::downgrade(&cell),
        })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Finish the grammar and return the parser for `root`.
    ///
    /// Fails if any declared rule never received a definition. The returned
    /// parser keeps every rule of the grammar alive.
    pub fn entry<T: 'static>(self, root: &Rule<T>) -> Result<Parser<T>, GrammarError> {
        if let Some(undefined) = self.rules.iter().find(|slot| !slot.is_defined()) {
            return Err(GrammarError::UndefinedRule(undefined.name().to_string()));
        }

        let root = self.owned_cell(root)?;
        debug!(grammar = self.id, rule = %root.name, rules = self.rules.len(), "grammar complete");

        let label = format!("grammar({})", root.name);
        let frozen = Frozen {
            root,
            rules: self.rules,
        };
        Ok(Parser::new(label, move |input, pos| frozen.parse_at(input, pos)))
    }

    fn owned_cell<T: 'static>(&self, rule: &Rule<T>) -> Result<Arc<RuleCell<T>>, GrammarError> {
        rule.cell
            .upgrade()
            .filter(|cell| cell.grammar == self.id)
            .ok_or_else(|| GrammarError::ForeignRule(rule.name.to_string()))
    }
}

/// A finished grammar: the root rule plus strong references to every rule.
struct Frozen<T> {
    root: Arc<RuleCell<T>>,
    rules: Vec<Arc<dyn Slot>>,
}

impl<T: 'static> Frozen<T> {
    fn parse_at(&self, input: &Input<'_>, pos: Position) -> ParseResult<T> {
        trace!(rule = %self.root.name, rules = self.rules.len(), pos, "entering grammar");
        self.root.parse_at(input, pos)
    }
}

/// Build a single self-referential parser.
///
/// `build` receives a parser standing for the result being built:
///
/// ```
/// use braid::{character, choice, recursive, right, run};
///
/// // any number of '(' followed by 'x'
/// let nested = recursive(|nested| {
///     choice(vec![right(character('('), nested), character('x')])
/// });
/// assert_eq!(run(&nested, "((x"), Ok(('x', "")));
/// ```
pub fn recursive<T, F>(build: F) -> Parser<T>
where
    T: 'static,
    F: FnOnce(Parser<T>) -> Parser<T>,
{
    let name: Arc<str> = Arc::from("recursive");
    let cell = Arc::new(RuleCell::new(Arc::clone(&name), next_grammar_id()));
    let this = Rule {
        name,
        cell: Arc::downgrade(&cell),
    };

    // A fresh cell is always empty.
    let _ = cell.target.set(build(recur(&this)));

    Parser::new("recursive", move |input, pos| cell.parse_at(input, pos))
}
