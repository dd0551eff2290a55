/*!
# An Introduction to Snowman

Snowman has no stack and no named user variables. It has eight slots, called
`a` through `h`, and every operator communicates through them. Which slots an
operator may touch is controlled by a set of *active* flags, and flipping
those flags around is half the game of writing a Snowman program.

Start a REPL with `snowman -i`. After every line it prints the machine: one
`{ }` group per slot, with a `*` marking the active ones, followed by any
permavars you have defined.

## Storing and retrieving

A literal like `7`, `"text"`, or the block `:1nA;` is *stored*: it lands in
the first active slot that is empty. An operator *retrieves* its operands
from the active slots in order, then stores its result the same way. So to
add two numbers you need active slots for them, plus an empty active slot
for the result:

<pre><code>&nbsp;~ }3 4nA
&nbsp;  {  } {* 7 } {  } {  } {*  } {  } {*  } {  }
</code></pre>

`}` makes `b`, `e`, and `g` active; `3` and `4` fill `b` and `e`; `nA` takes
both and leaves their sum in `b`.

The capitalization of `nA` matters. A letter operator's final-letter case is
its *consume* modifier: `nA` empties the slots it reads, `na` leaves them in
place. Three-letter operators spell it `NaB` (consume) versus `NAb` (keep).

## Printing

Text is an array of character codes. `sP` prints one:

<pre><code>&nbsp;~ }"Hello, World!"sP
&nbsp;  Hello, World!{  } {*  } {  } {  } {*  } {  } {*  } {  }
</code></pre>

Numbers become text with `tS` (inspect), so `}3 4nAtSsP` prints `7`.

## Blocks

Anything between `:` and `;` is an unevaluated block, stored like any other
value and run on demand. `bR` repeats a block, `bI` picks between two, `bW`
loops while a condition block leaves behind a true value. Note that the
condition comes *second*: `bW` takes the body from the first active block
slot and the condition from the next.

## Permavars

Operands are fetched strictly in slot order, so a counter sitting in slot
`a` would shadow the blocks an operator wants. Long-lived state goes in
*permavars* instead: an unbounded set of variables addressed by switch
tokens like `+`, `!`, `=+`, `=!`, `==+`, and so on. A switch token selects
the current permavar; `*` sets it from the first defined active value, and
`#` stores its value back into the slots. A countdown:

<pre><code>&nbsp;~ ~10*:#tSsP" "sP#1nS*;:#;bW
&nbsp;  10 9 8 7 6 5 4 3 2 1 {*  } {*  } {*  } {*  } {*  } {*  } {*  } {*  } +=0
</code></pre>

`~10*` activates everything and moves 10 into the permavar `+`. The first
block prints the counter and decrements it; the second fetches it as the
loop condition, so the loop stops when it reaches zero.

## Subroutines

`((` saves all eight slots and their active flags and hands you a blank
machine; `))` throws your machine away and restores the saved one. Permavars
survive the round trip, which makes them the way to pass results out.

For the full operator table, see Appendix A.
*/
