/*!
# Appendix A: Operator Reference

Argument signatures name the operand types an operator retrieves, in slot
order: `n` number, `a` array, `b` block, `*` anything, `-` nothing. The
result column is what gets stored. Letter operators take a consume modifier
through capitalization; symbol operators never consume.

## Rotation operators

Each swaps (or cycles) the contents of fixed slots, active or not.

| op  | slots       | op  | slots       |
|-----|-------------|-----|-------------|
| `/` | c f         | `'` | b d         |
| `\` | a h         | `` ` `` | b e     |
| `_` | f h         | `,` | e g         |
| `[` | a f         | `.` | d g         |
| `]` | c h         | `^` | b ← d ← e   |
| `|` | b g         | `>` | f ← e ← a   |
| `-` | d e         | `<` | c ← d ← h   |

## Active variable operators

- `(`: toggle a, f
- `)`: toggle c, h
- `{`: toggle b, d, g
- `}`: toggle b, e, g
- `~`: invert all eight flags
- `@`: rotate; each flag advances one step along the ring a,b,c,e,h,g,f,d
- `%`: reflect; four steps along the same ring
- `?`: mark all inactive
- `$`: save the eight flags to the snapshot
- `&`: restore the snapshot

## Permavar operators

- permavar switch (`+`, `!`, `=+`, `=!`, `==+`, and so on): select a permavar
- `*` (*) -> -: set the selected permavar from the first defined value
- `#` (-) -> *: store the selected permavar's value

## Number operators

- `NIN` (n) -> n: increment
- `NDE` (n) -> n: decrement
- `NAB` (n) -> n: absolute value
- `nf` (n) -> n: floor
- `nc` (n) -> n: ceiling
- `NRO` (n) -> n: round
- `NBN` (n) -> n: bitwise NOT
- `NBO` (nn) -> n: bitwise OR
- `NBA` (nn) -> n: bitwise AND
- `NBX` (nn) -> n: bitwise XOR
- `na` (nn) -> n: addition
- `ns` (nn) -> n: subtraction
- `nm` (nn) -> n: multiplication
- `nd` (nn) -> n: division
- `NMO` (nn) -> n: modulo
- `nl` (nn) -> n: less than
- `ng` (nn) -> n: greater than
- `nr` (nn) -> a: range, ascending or descending toward the second bound
- `np` (nn) -> n: power
- `nb` (nn) -> a: to base, using digits `0-9a-z`

## Array operators

- `ASO` (a) -> a: sort
- `ASB` (ab) -> a: sort by block comparator ("is the left smaller?")
- `af` (ab) -> *: fold
- `ac` (aa) -> a: concatenate
- `ad` (aa) -> a: set difference
- `AOR` (aa) -> a: setwise or (union)
- `AAN` (aa) -> a: setwise and (intersection)
- `ar` (an) -> a: repeat
- `aj` (aa) -> a: join with separator
- `as` (aa) -> a: split on subsequence
- `ag` (an) -> a: group into chunks of n
- `ae` (ab) -> -: each
- `am` (ab) -> a: map
- `an` (an) -> a: every nth element (negative n walks backward)
- `ASE` (ab) -> a: select
- `ASI` (ab) -> a: select indices
- `AAL` (an) -> a: elements at indices below n
- `AAG` (an) -> a: elements at indices above n
- `aa` (an) -> *: element at index (out of range gives 0)
- `al` (a) -> n: length
- `az` (a) -> a: zip/transpose, ragged rows pad by omission
- `ASP` (anna) -> a: splice: array, start, length, replacement
- `AFL` (an) -> a: flatten n layers (0 = completely)
- `ASH` (a) -> a: shuffle

## Text operators

Text is an array of character-code numbers.

- `sb` (an) -> n: from base
- `sp` (a) -> -: print, with no trailing line break
- `sm` (aa) -> a: regex match; text, then pattern
- `sr` (aaa) -> a: regex replace; text, pattern, replacement
- `SRB` (aab) -> a: regex replace, running a block on each match

## Block operators

- `br` (bn) -> -: repeat n times
- `bw` (bb) -> -: while; body first, then condition
- `bi` (bb*) -> -: if/else
- `bd` (b) -> -: do-while (`:…;bD` is `:;:…;bW` with one guaranteed pass)
- `be` (b) -> -: execute

## Any-type operators

- `no` (*) -> n: logical not (`1` for `0`, `:;`, `[]`; else `0`)
- `bo` (**) -> n: logical and ("bo" = "both"; `an`, `ad`, `nd` were taken)
- `or` (**) -> n: logical or
- `eq` (**) -> n: equal? (types must match; deep comparison)
- `du` (*) -> **: duplicate
- `wr` (*) -> a: wrap in array
- `ts` (*) -> a: to text, in `debug` rendering

## Void operators

- `vn` (-) -> -: no-op
- `vg` (-) -> a: read one line of input as text
- `vr` (-) -> n: uniform random number in [0,1)
- `vt` (-) -> n: seconds since the epoch
- `va` (-) -> a: the program's command-line arguments
*/
